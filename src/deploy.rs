//! Deployment-specific URL layout.
//!
//! The site is served either from the domain root or mounted under a path
//! prefix (the public museum deployment lives under `/orange-museum`). Every
//! URL the bootstrap hands to the host must carry the same prefix, so both
//! are derived from a single value here.

/// Page the game navigates to through `go_to_location`.
const MESSAGE_PATH: &str = "/basement/message";

/// Resource path of the compiled game module.
const WASM_PATH: &str = "/public/basement.wasm";

/// URL prefix the site is mounted under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deployment {
    prefix: String,
}

impl Deployment {
    /// Deployment served from the domain root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Deployment mounted under `prefix`, e.g. `/orange-museum`.
    ///
    /// A trailing slash is stripped and a leading slash added if missing; an
    /// empty prefix is the root deployment.
    pub fn mounted(prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return Self::root();
        }

        let prefix = if prefix.starts_with('/') {
            prefix.to_owned()
        } else {
            format!("/{prefix}")
        };

        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Navigation target for the `go_to_location` capability.
    pub fn message_path(&self) -> String {
        format!("{}{}", self.prefix, MESSAGE_PATH)
    }

    /// Path of the game module the host loader should fetch.
    pub fn wasm_path(&self) -> String {
        format!("{}{}", self.prefix, WASM_PATH)
    }
}
