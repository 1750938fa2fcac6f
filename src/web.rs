//! Browser side of the boot sequence.
//!
//! Binds the miniquad JS glue (`miniquad_add_plugin` and `load` from `gl.js`)
//! and the page location, and exposes the entry points the loader page calls.

use wasm_bindgen::prelude::*;

use crate::{
    deploy::Deployment,
    plugin::{ImportObject, PluginDescriptor, ENV_NAMESPACE},
    ModuleLoader, Navigator, PluginRegistry,
};

#[wasm_bindgen]
extern "C" {
    /// miniquad's plugin hook. Accepts `{ register_plugin }` and runs the
    /// hook against the import object before instantiating the module.
    #[wasm_bindgen(js_name = miniquad_add_plugin)]
    fn miniquad_add_plugin(descriptor: &js_sys::Object);

    /// miniquad's module loader. Fetches and instantiates the module
    /// asynchronously; nothing is reported back.
    fn load(path: &str);
}

/// Plugin registry backed by the miniquad JS glue.
pub struct MiniquadRegistry;

impl PluginRegistry for MiniquadRegistry {
    fn add_plugin(&mut self, plugin: PluginDescriptor) {
        let mut imports = ImportObject::new();
        plugin.register(&mut imports);

        // miniquad calls register_plugin once, right before instantiation
        let mut imports = Some(imports);
        let register_plugin =
            Closure::<dyn FnMut(js_sys::Object)>::new(move |import_object: js_sys::Object| {
                let Some(imports) = imports.take() else {
                    log::warn!("register_plugin called more than once");
                    return;
                };

                let env = match js_sys::Reflect::get(&import_object, &ENV_NAMESPACE.into()) {
                    Ok(env) if env.is_object() => js_sys::Object::from(env),
                    _ => {
                        log::error!("import object has no {ENV_NAMESPACE} namespace");
                        return;
                    }
                };

                for (name, func) in imports {
                    let func = Closure::wrap(func);
                    if js_sys::Reflect::set(&env, &name.as_str().into(), func.as_ref()).is_err() {
                        log::error!("failed to attach {ENV_NAMESPACE}.{name}");
                    }
                    // the module holds the import for the lifetime of the page
                    func.forget();
                }
            });

        let descriptor = js_sys::Object::new();
        if js_sys::Reflect::set(
            &descriptor,
            &"register_plugin".into(),
            register_plugin.as_ref(),
        )
        .is_err()
        {
            log::error!("failed to build the plugin descriptor");
            return;
        }
        register_plugin.forget();

        miniquad_add_plugin(&descriptor);
    }
}

/// Module loader backed by the miniquad JS glue.
pub struct MiniquadLoader;

impl ModuleLoader for MiniquadLoader {
    fn load(&mut self, path: &str) -> anyhow::Result<()> {
        load(path);
        Ok(())
    }
}

/// Navigation surface backed by `window.location`.
#[derive(Clone)]
pub struct PageNavigator;

impl Navigator for PageNavigator {
    fn go_to(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            log::error!("no window to navigate");
            return;
        };

        if window.location().set_href(path).is_err() {
            log::error!("navigation to {path} failed");
        }
    }
}

/// Boot the game on a deployment served from the domain root.
#[wasm_bindgen]
pub fn run() {
    start(Deployment::root());
}

/// Boot the game on a deployment mounted under `prefix`,
/// e.g. `/orange-museum`.
#[wasm_bindgen]
pub fn run_mounted(prefix: &str) {
    start(Deployment::mounted(prefix));
}

fn start(deployment: Deployment) {
    wasm_logger::init(wasm_logger::Config::default());

    if let Err(err) = crate::boot(MiniquadRegistry, MiniquadLoader, PageNavigator, deployment) {
        log::error!("boot failed: {err}");
    }
}
