//! Runtime configuration, loadable from a TOML file:
//!
//! ```toml
//! [runtime]
//! dispatch-actions = true
//! log-filter = "canvas_runtime=debug,info"
//! ```

use crate::error::RuntimeResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Configuration for the widget runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Whether triggers dispatch bound actions. When off, updates only
    /// write meta-state (useful in the editor canvas).
    #[serde(default = "default_dispatch_actions")]
    pub dispatch_actions: bool,
    /// `EnvFilter` directives used by [`crate::init_tracing`].
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_dispatch_actions() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            dispatch_actions: default_dispatch_actions(),
            log_filter: default_log_filter(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    runtime: RuntimeConfig,
}

impl RuntimeConfig {
    /// Parses a TOML document with an optional `[runtime]` table.
    pub fn from_toml_str(contents: &str) -> RuntimeResult<Self> {
        Ok(toml::from_str::<ConfigFile>(contents)?.runtime)
    }

    /// Loads configuration from `path`, falling back to defaults with a
    /// warning when the file is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No runtime config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded runtime config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse runtime config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read runtime config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
