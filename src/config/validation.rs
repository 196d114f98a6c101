//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate flag rates and names
//! - Detect duplicate flag names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FlagConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Flags under the off backend are never served, so they are not checked

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{BackendKind, FlagConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("flag #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("flag {name:?} has rate {rate}, expected a value within [0, 1]")]
    RateOutOfRange { name: String, rate: f64 },

    #[error("flag {name:?} is defined more than once")]
    DuplicateFlag { name: String },
}

/// Check a parsed configuration.
pub fn validate_config(config: &FlagConfig) -> Result<(), Vec<ValidationError>> {
    if config.backend.kind == BackendKind::Off {
        return Ok(());
    }

    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, flag) in config.backend.flags.iter().enumerate() {
        if flag.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
            continue;
        }
        if !(0.0..=1.0).contains(&flag.rate) {
            errors.push(ValidationError::RateOutOfRange {
                name: flag.name.clone(),
                rate: flag.rate,
            });
        }
        if !seen.insert(flag.name.as_str()) {
            errors.push(ValidationError::DuplicateFlag {
                name: flag.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
