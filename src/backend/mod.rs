//! Pluggable flag backends.
//!
//! # Data Flow
//! ```text
//! caller
//!     → Backend::flag(name)            (lookup path, synchronous)
//!     → FlagLookup or BackendError
//!
//! backend refresh logic (owned by the concrete backend)
//!     → BackendBase::handle_error(err) → error handler  (async, unordered)
//!     → BackendBase::handle_age(age)   → age callback   (async, unordered)
//! ```
//!
//! # Design Decisions
//! - Every backend embeds a `BackendBase` and delegates the setters to it
//! - At most one handler of each kind; setting a new one replaces the old
//! - Lookup errors are returned, refresh errors are reported out of band
//! - Backends are `Send + Sync` and are shared as `Arc<dyn Backend>`

pub mod base;
pub mod error;
pub mod handlers;
pub mod off;
pub mod static_backend;

pub use base::BackendBase;
pub use error::{BackendError, BackendResult};
pub use handlers::{AgeCallback, AgeSource, ErrorHandler, AGE_SOURCE};
pub use off::OffBackend;
pub use static_backend::StaticBackend;

use std::sync::Arc;
use std::time::SystemTime;

use crate::config::{BackendKind, BackendSettings};
use crate::flag::Flag;

/// Result of a successful flag lookup.
#[derive(Debug, Clone)]
pub struct FlagLookup {
    /// The flag for the requested name.
    pub flag: Arc<dyn Flag>,
    /// When the backend last refreshed its flags; `None` if unknown.
    pub updated_at: Option<SystemTime>,
}

/// A source of flag data.
///
/// All methods may be called concurrently from any thread.
pub trait Backend: Send + Sync {
    /// Look up the flag called `name`.
    ///
    /// Must not block indefinitely.
    fn flag(&self, name: &str) -> BackendResult<FlagLookup>;

    /// Install the handler for internal errors, replacing any previous one.
    /// `None` disables error notification. Past errors are not replayed.
    fn set_error_handler(&self, handler: Option<ErrorHandler>);

    /// Install the callback invoked with the data age after each refresh,
    /// replacing any previous one. `None` disables it.
    fn set_age_callback(&self, callback: Option<AgeCallback>);

    /// Release the backend's resources. Safe to call more than once.
    fn close(&self) -> BackendResult<()>;
}

/// Build the backend described by `settings`.
pub fn from_settings(settings: &BackendSettings) -> BackendResult<Arc<dyn Backend>> {
    match settings.kind {
        BackendKind::Off => {
            if !settings.flags.is_empty() {
                tracing::warn!(
                    flags = settings.flags.len(),
                    "Flags configured for the off backend are ignored"
                );
            }
            tracing::info!("Using off backend, all flags disabled");
            Ok(Arc::new(OffBackend::new()))
        }
        BackendKind::Static => {
            let backend = StaticBackend::new(settings.flags.iter().cloned())?;
            tracing::info!(flags = backend.len(), "Using static backend");
            Ok(Arc::new(backend))
        }
    }
}
