//! Backend error definitions.

use std::time::SystemTime;

use thiserror::Error;

/// Errors raised by flag backends, either from a lookup or from their
/// internal refresh work.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend has no flag with this name.
    #[error("unknown flag: {name}")]
    UnknownFlag { name: String },

    /// The backend was closed.
    #[error("backend closed")]
    Closed,

    /// A flag in an update was rejected.
    #[error("invalid flag {name:?}: {reason}")]
    InvalidFlag { name: String, reason: String },

    /// An update carried data older than what is already served.
    #[error("stale update: data as of {as_of:?} is older than current {current:?}")]
    Stale {
        as_of: SystemTime,
        current: SystemTime,
    },

    /// A refresh cycle failed.
    #[error("refresh failed: {0}")]
    Refresh(String),

    /// Error from the underlying data source.
    #[error(transparent)]
    Source(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
