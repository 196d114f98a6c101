//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FlagConfig (validated, immutable)
//!     → backend::from_settings builds the configured backend
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; an empty file selects the off backend
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BackendKind, BackendSettings, FlagConfig, LoggingConfig};
pub use validation::ValidationError;
