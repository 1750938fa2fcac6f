//! The import-registration contract between the bootstrap and the host.
//!
//! A [`PluginDescriptor`] mirrors the miniquad plugin shape: a single
//! `register_plugin` hook that mutates the [`ImportObject`] before the module
//! is instantiated. Once registered, the host owns the imports for the
//! lifetime of the page.

use std::collections::BTreeMap;

use anyhow::anyhow;

/// Namespace under which host capabilities are exposed to the module.
pub const ENV_NAMESPACE: &str = "env";

/// Name of the navigation capability the basement game imports.
pub const GO_TO_LOCATION: &str = "go_to_location";

/// A zero-argument capability callable by the loaded module.
pub type HostFn = Box<dyn FnMut() + 'static>;

/// The structure through which the host exposes callable capabilities to the
/// loaded module.
#[derive(Default)]
pub struct ImportObject {
    env: BTreeMap<String, HostFn>,
}

impl ImportObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a zero-argument capability under `env.<name>`.
    pub fn define(&mut self, name: &str, f: impl FnMut() + 'static) {
        self.env.insert(name.to_owned(), Box::new(f));
    }

    /// Invoke a registered capability, as the instantiated module does
    /// through its imports.
    pub fn call(&mut self, name: &str) -> anyhow::Result<()> {
        let f = self
            .env
            .get_mut(name)
            .ok_or_else(|| anyhow!("unknown import: {ENV_NAMESPACE}.{name}"))?;
        f();

        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.env.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.env.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.env.len()
    }

    pub fn is_empty(&self) -> bool {
        self.env.is_empty()
    }
}

/// Hands the registered capabilities over to the host runtime.
impl IntoIterator for ImportObject {
    type Item = (String, HostFn);
    type IntoIter = std::collections::btree_map::IntoIter<String, HostFn>;

    fn into_iter(self) -> Self::IntoIter {
        self.env.into_iter()
    }
}

/// Descriptor submitted to the host plugin registry.
pub struct PluginDescriptor {
    register_plugin: Box<dyn FnOnce(&mut ImportObject) + 'static>,
}

impl PluginDescriptor {
    pub fn new(register_plugin: impl FnOnce(&mut ImportObject) + 'static) -> Self {
        Self {
            register_plugin: Box::new(register_plugin),
        }
    }

    /// Run the registration hook against the host's import object.
    pub fn register(self, imports: &mut ImportObject) {
        (self.register_plugin)(imports)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn defined_import_is_callable() {
        let calls = Rc::new(Cell::new(0));
        let mut imports = ImportObject::new();

        let counter = calls.clone();
        imports.define(GO_TO_LOCATION, move || counter.set(counter.get() + 1));

        imports.call(GO_TO_LOCATION).unwrap();
        imports.call(GO_TO_LOCATION).unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut imports = ImportObject::new();

        let err = imports.call("missing").unwrap_err();

        assert!(err.to_string().contains("env.missing"));
    }

    #[test]
    fn descriptor_registers_against_the_import_object() {
        let mut imports = ImportObject::new();
        let plugin = PluginDescriptor::new(|imports| imports.define(GO_TO_LOCATION, || {}));

        assert!(imports.is_empty());
        plugin.register(&mut imports);

        assert_eq!(imports.len(), 1);
        assert!(imports.contains(GO_TO_LOCATION));
        assert_eq!(imports.names().collect::<Vec<_>>(), vec![GO_TO_LOCATION]);
    }
}
