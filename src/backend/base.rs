//! Shared handler registration and dispatch.
//!
//! # Responsibilities
//! - Hold at most one error handler and one age callback
//! - Replace handlers atomically (setters take the write lock)
//! - Dispatch notifications without blocking the reporting backend
//!
//! # Design Decisions
//! - One `RwLock` guards both handlers as a unit
//! - The lock is only held to clone the handler `Arc`; the handler runs after
//!   the guard is dropped, so a slow handler never blocks registration
//! - Every notification is its own task: `spawn_blocking` on the ambient tokio
//!   runtime, or a dedicated thread when there is none
//! - No ordering between notifications, even for the same handler
//! - Notifications with no registered handler are dropped

use std::fmt;
use std::sync::{PoisonError, RwLock};
use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;

use crate::backend::{AgeCallback, BackendError, BackendResult, ErrorHandler, AGE_SOURCE};
use crate::observability::metrics;

#[derive(Default)]
struct Handlers {
    error: Option<ErrorHandler>,
    age: Option<AgeCallback>,
}

/// Handler state embedded by every concrete backend.
///
/// Backends hold a `BackendBase` by value, delegate the setters and
/// [`close`](Self::close) to it, and call [`handle_error`](Self::handle_error)
/// and [`handle_age`](Self::handle_age) from their refresh logic.
#[derive(Default)]
pub struct BackendBase {
    handlers: RwLock<Handlers>,
}

impl BackendBase {
    /// Create a base with no handlers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the error handler, replacing any previous one. `None` disables it.
    pub fn set_error_handler(&self, handler: Option<ErrorHandler>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.error = handler;
    }

    /// Install the age callback, replacing any previous one. `None` disables it.
    pub fn set_age_callback(&self, callback: Option<AgeCallback>) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        handlers.age = callback;
    }

    /// Report an internal error to the registered handler.
    ///
    /// Returns as soon as the notification is scheduled.
    pub fn handle_error(&self, err: BackendError) {
        let handler = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .error
            .clone();

        match handler {
            Some(handler) => spawn_dispatch("error", move || handler(err)),
            None => {
                tracing::debug!(error = %err, "No error handler registered, dropping error");
                metrics::record_dropped("error");
            }
        }
    }

    /// Report the current data age to the registered age callback.
    pub fn handle_age(&self, age: Duration) {
        let callback = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .age
            .clone();

        match callback {
            Some(callback) => spawn_dispatch("age", move || callback(AGE_SOURCE, age)),
            None => {
                tracing::trace!(age_ms = age.as_millis() as u64, "No age callback registered");
                metrics::record_dropped("age");
            }
        }
    }

    /// Nothing to release.
    pub fn close(&self) -> BackendResult<()> {
        Ok(())
    }
}

impl fmt::Debug for BackendBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("BackendBase")
            .field("error_handler", &handlers.error.is_some())
            .field("age_callback", &handlers.age.is_some())
            .finish()
    }
}

/// A notification on its way to a handler. Dropped undelivered when the
/// task never runs, e.g. the runtime is shutting down or no thread could be
/// spawned.
struct Pending {
    handler: &'static str,
    delivered: bool,
}

impl Drop for Pending {
    fn drop(&mut self) {
        if !self.delivered {
            tracing::warn!(handler = self.handler, "Notification dropped before reaching its handler");
            metrics::record_dropped(self.handler);
        }
    }
}

fn spawn_dispatch<F>(handler: &'static str, task: F)
where
    F: FnOnce() + Send + 'static,
{
    let pending = Pending {
        handler,
        delivered: false,
    };
    let job = move || {
        let mut pending = pending;
        pending.delivered = true;
        metrics::record_dispatch(pending.handler);
        task();
    };

    if let Ok(runtime) = Handle::try_current() {
        drop(runtime.spawn_blocking(job));
        return;
    }

    if let Err(e) = thread::Builder::new()
        .name("flag-dispatch".to_string())
        .spawn(job)
    {
        tracing::warn!(error = %e, "Failed to spawn handler dispatch thread");
    }
}
