//! Dry-runs the boot sequence against a simulated host, then invokes the
//! registered capability the way the game does when the player steps on the
//! pressure plate.

use std::{cell::RefCell, rc::Rc};

use argh::FromArgs;
use basement_boot::{
    plugin::{ImportObject, GO_TO_LOCATION},
    Bootstrap, Deployment, ModuleLoader, Navigator, PluginDescriptor, PluginRegistry,
};

#[derive(FromArgs)]
#[argh(description = "Dry-run the basement boot sequence.")]
struct Args {
    #[argh(
        option,
        short = 'p',
        default = "String::new()",
        description = "url prefix the site is mounted under, e.g. /orange-museum"
    )]
    prefix: String,
}

/// Stands in for the browser host, logging what the real glue would do.
#[derive(Clone, Default)]
struct SimHost {
    imports: Rc<RefCell<ImportObject>>,
}

impl PluginRegistry for SimHost {
    fn add_plugin(&mut self, plugin: PluginDescriptor) {
        let mut imports = self.imports.borrow_mut();
        plugin.register(&mut imports);

        for name in imports.names() {
            log::info!("registered env.{name}");
        }
    }
}

impl ModuleLoader for SimHost {
    fn load(&mut self, path: &str) -> anyhow::Result<()> {
        log::info!("load requested: {path}");
        Ok(())
    }
}

impl Navigator for SimHost {
    fn go_to(&self, path: &str) {
        log::info!("window.location.href = {path}");
    }
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    pretty_env_logger::init();

    let host = SimHost::default();
    Bootstrap::new(
        host.clone(),
        host.clone(),
        host.clone(),
        Deployment::mounted(&args.prefix),
    )
    .run()?;

    // the game hitting the pressure plate
    host.imports.borrow_mut().call(GO_TO_LOCATION)?;

    Ok(())
}
