//! The one-shot boot sequence.

use crate::{
    deploy::Deployment,
    plugin::{PluginDescriptor, GO_TO_LOCATION},
    ModuleLoader, Navigator, PluginRegistry,
};

/// Wires the navigation capability into the host, then requests the game
/// module load.
///
/// Registration happens synchronously before the load request goes out,
/// because the game may call `go_to_location` during its own startup.
pub struct Bootstrap<R, L, N> {
    registry: R,
    loader: L,
    navigator: N,
    deployment: Deployment,
}

impl<R, L, N> Bootstrap<R, L, N>
where
    R: PluginRegistry,
    L: ModuleLoader,
    N: Navigator + Clone + 'static,
{
    pub fn new(registry: R, loader: L, navigator: N, deployment: Deployment) -> Self {
        Self {
            registry,
            loader,
            navigator,
            deployment,
        }
    }

    /// Register `env.go_to_location`, then ask the host to load the game
    /// module.
    ///
    /// The load is fire-and-forget; only a refusal to start it is reported.
    /// Consumes the bootstrap, the sequence runs once per page.
    pub fn run(mut self) -> anyhow::Result<()> {
        let target = self.deployment.message_path();
        let navigator = self.navigator.clone();

        self.registry
            .add_plugin(PluginDescriptor::new(move |imports| {
                imports.define(GO_TO_LOCATION, move || navigator.go_to(&target));
            }));

        let path = self.deployment.wasm_path();
        log::debug!("requesting load of {path}");
        self.loader.load(&path)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use anyhow::bail;

    use super::*;
    use crate::plugin::ImportObject;

    #[derive(Debug, PartialEq, Eq)]
    enum HostCall {
        AddPlugin,
        Load(String),
        Navigate(String),
    }

    /// Stands in for the registry, loader and navigation surface at once,
    /// recording every call in order.
    #[derive(Clone, Default)]
    struct RecordingHost {
        calls: Rc<RefCell<Vec<HostCall>>>,
        imports: Rc<RefCell<ImportObject>>,
    }

    impl PluginRegistry for RecordingHost {
        fn add_plugin(&mut self, plugin: PluginDescriptor) {
            self.calls.borrow_mut().push(HostCall::AddPlugin);
            plugin.register(&mut self.imports.borrow_mut());
        }
    }

    impl ModuleLoader for RecordingHost {
        fn load(&mut self, path: &str) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(HostCall::Load(path.to_owned()));
            Ok(())
        }
    }

    impl Navigator for RecordingHost {
        fn go_to(&self, path: &str) {
            self.calls
                .borrow_mut()
                .push(HostCall::Navigate(path.to_owned()));
        }
    }

    struct RefusingLoader;

    impl ModuleLoader for RefusingLoader {
        fn load(&mut self, _path: &str) -> anyhow::Result<()> {
            bail!("host loader refused the request")
        }
    }

    fn bootstrap(
        host: &RecordingHost,
        deployment: Deployment,
    ) -> Bootstrap<RecordingHost, RecordingHost, RecordingHost> {
        Bootstrap::new(host.clone(), host.clone(), host.clone(), deployment)
    }

    #[test]
    fn registers_before_loading() {
        let host = RecordingHost::default();

        bootstrap(&host, Deployment::root()).run().unwrap();

        assert_eq!(
            *host.calls.borrow(),
            vec![
                HostCall::AddPlugin,
                HostCall::Load("/public/basement.wasm".to_owned()),
            ]
        );
    }

    #[test]
    fn registers_exactly_the_navigation_capability() {
        let host = RecordingHost::default();

        bootstrap(&host, Deployment::root()).run().unwrap();

        let imports = host.imports.borrow();
        assert_eq!(imports.len(), 1);
        assert!(imports.contains(GO_TO_LOCATION));
    }

    #[test]
    fn capability_navigates_to_the_message_page() {
        let host = RecordingHost::default();

        bootstrap(&host, Deployment::root()).run().unwrap();
        host.imports.borrow_mut().call(GO_TO_LOCATION).unwrap();

        assert_eq!(
            host.calls.borrow().last(),
            Some(&HostCall::Navigate("/basement/message".to_owned()))
        );
    }

    #[test]
    fn mounted_deployment_prefixes_both_paths() {
        let host = RecordingHost::default();

        bootstrap(&host, Deployment::mounted("/orange-museum"))
            .run()
            .unwrap();
        host.imports.borrow_mut().call(GO_TO_LOCATION).unwrap();

        assert_eq!(
            *host.calls.borrow(),
            vec![
                HostCall::AddPlugin,
                HostCall::Load("/orange-museum/public/basement.wasm".to_owned()),
                HostCall::Navigate("/orange-museum/basement/message".to_owned()),
            ]
        );
    }

    #[test]
    fn nothing_happens_before_run() {
        let host = RecordingHost::default();

        let _pending = bootstrap(&host, Deployment::root());

        assert!(host.calls.borrow().is_empty());
        assert!(host.imports.borrow().is_empty());
    }

    #[test]
    fn refused_load_surfaces_an_error() {
        let host = RecordingHost::default();

        let result = Bootstrap::new(
            host.clone(),
            RefusingLoader,
            host.clone(),
            Deployment::root(),
        )
        .run();

        assert!(result.is_err());
        // registration still happened first
        assert_eq!(*host.calls.borrow(), vec![HostCall::AddPlugin]);
    }
}
