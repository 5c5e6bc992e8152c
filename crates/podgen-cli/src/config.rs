//! Settings for the podgen binaries
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! command-line flags. Example file:
//!
//! ```toml
//! environment = "staging"
//! namespace = "sandbox"
//! kubeconfig = "/etc/kube/ci.yaml"
//! context = "kind-ci"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use podgen_types::{DEFAULT_ENVIRONMENT, DEFAULT_NAMESPACE};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Value of the pod's `ENV` variable
    pub environment: String,
    /// Namespace to create the pod in
    pub namespace: String,
    /// Kubeconfig path; `~/.kube/config` when unset
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context; the file's current context when unset
    pub context: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            kubeconfig: None,
            context: None,
        }
    }
}

/// Command-line values that take precedence over the settings file
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub environment: Option<String>,
    pub namespace: Option<String>,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl Settings {
    /// Load settings from `path`, or return the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        debug!(path = %path.display(), "loading settings");
        let content = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(environment) = overrides.environment {
            self.environment = environment;
        }
        if let Some(namespace) = overrides.namespace {
            self.namespace = namespace;
        }
        if overrides.kubeconfig.is_some() {
            self.kubeconfig = overrides.kubeconfig;
        }
        if overrides.context.is_some() {
            self.context = overrides.context;
        }
        self
    }
}
