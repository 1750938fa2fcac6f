//! Browser bootstrap for the basement game.
//!
//! Registers the `env.go_to_location` import with the host plugin registry,
//! then asks the host loader to fetch and instantiate the compiled game
//! module. The game calls `go_to_location` when the player steps on the
//! pressure plate, which navigates the page to the basement message.
//!
//! The host surfaces (plugin registry, module loader, page navigation) are
//! traits so the sequence can run against test doubles; [`web`] binds them to
//! the real miniquad JS glue in the browser.

pub mod bootstrap;
pub mod deploy;
pub mod plugin;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[doc(inline)]
pub use crate::{
    bootstrap::Bootstrap,
    deploy::Deployment,
    plugin::{ImportObject, PluginDescriptor},
};

/// Common trait for host plugin registries.
///
/// The registry customizes the game's import object before the module is
/// instantiated.
pub trait PluginRegistry {
    fn add_plugin(&mut self, plugin: PluginDescriptor);
}

/// Common trait for host module loaders.
pub trait ModuleLoader {
    /// Begin fetching and instantiating the module at `path`.
    ///
    /// The load itself is asynchronous and its completion is never observed;
    /// an `Err` only means the request could not be issued.
    fn load(&mut self, path: &str) -> anyhow::Result<()>;
}

/// Common trait for the page navigation surface.
pub trait Navigator {
    /// Point the page at `path`, discarding the current page state.
    fn go_to(&self, path: &str);
}

/// alias for Bootstrap::new(...).run()
pub fn boot<R, L, N>(
    registry: R,
    loader: L,
    navigator: N,
    deployment: Deployment,
) -> anyhow::Result<()>
where
    R: PluginRegistry,
    L: ModuleLoader,
    N: Navigator + Clone + 'static,
{
    Bootstrap::new(registry, loader, navigator, deployment).run()
}
