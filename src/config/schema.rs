//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::flag::SampleFlag;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FlagConfig {
    /// Which backend to build and what it serves.
    pub backend: BackendSettings,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Backend selection.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BackendSettings {
    /// Backend implementation.
    pub kind: BackendKind,

    /// Flags served by the static backend.
    pub flags: Vec<SampleFlag>,
}

/// Available backend implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Every flag is off.
    #[default]
    Off,
    /// Flags listed in the config.
    Static,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "flag_backend=info".to_string(),
        }
    }
}
