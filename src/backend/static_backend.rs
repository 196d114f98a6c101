//! In-memory backend fed by its owner.
//!
//! # Responsibilities
//! - Serve lookups from an immutable flag snapshot
//! - Accept whole-snapshot updates pushed by the owner's refresh logic
//! - Report rejected updates and refresh failures through the error handler
//! - Report data age through the age callback after every accepted update
//!
//! # Design Decisions
//! - Snapshot lives in an `ArcSwap`; lookups never wait on updates
//! - An invalid update is rejected whole and the previous snapshot stays live
//! - `updated_at` never moves backwards: an update older than the served
//!   snapshot is rejected, reported as `Stale`, and dispatches no age
//! - Lookups keep working after close; only updates are refused

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;

use crate::backend::{
    AgeCallback, Backend, BackendBase, BackendError, BackendResult, ErrorHandler, FlagLookup,
};
use crate::flag::SampleFlag;
use crate::observability::metrics;

#[derive(Debug, Default)]
struct Snapshot {
    flags: HashMap<String, Arc<SampleFlag>>,
    updated_at: Option<SystemTime>,
}

/// A backend serving a fixed set of flags until its owner pushes a new one.
#[derive(Debug)]
pub struct StaticBackend {
    base: BackendBase,
    snapshot: ArcSwap<Snapshot>,
    closed: AtomicBool,
}

impl StaticBackend {
    /// Create a backend serving `flags`. No update time is recorded yet.
    pub fn new<I>(flags: I) -> BackendResult<Self>
    where
        I: IntoIterator<Item = SampleFlag>,
    {
        let flags = build_flags(flags).map_err(Rejection::into_error)?;
        Ok(Self {
            base: BackendBase::new(),
            snapshot: ArcSwap::from_pointee(Snapshot {
                flags,
                updated_at: None,
            }),
            closed: AtomicBool::new(false),
        })
    }

    /// Replace the served flags with data current as of `as_of`.
    ///
    /// Updates as of the same instant as the served snapshot are accepted;
    /// older ones are rejected. A rejected update is also sent to the error
    /// handler.
    pub fn update<I>(&self, flags: I, as_of: SystemTime) -> BackendResult<()>
    where
        I: IntoIterator<Item = SampleFlag>,
    {
        if self.closed.load(Ordering::Acquire) {
            self.base.handle_error(BackendError::Closed);
            return Err(BackendError::Closed);
        }

        let flags = match build_flags(flags) {
            Ok(flags) => flags,
            Err(rejection) => {
                tracing::warn!(
                    flag = %rejection.name,
                    reason = rejection.reason,
                    "Rejected flag update, keeping current flags"
                );
                self.base.handle_error(rejection.clone().into_error());
                return Err(rejection.into_error());
            }
        };

        let count = flags.len();
        let next = Arc::new(Snapshot {
            flags,
            updated_at: Some(as_of),
        });
        let previous = self.snapshot.rcu(|current| match current.updated_at {
            Some(current_at) if current_at > as_of => Arc::clone(current),
            _ => Arc::clone(&next),
        });

        if let Some(current) = previous.updated_at.filter(|current_at| *current_at > as_of) {
            tracing::warn!(
                as_of = ?as_of,
                current = ?current,
                "Rejected stale flag update, keeping current flags"
            );
            self.base.handle_error(BackendError::Stale { as_of, current });
            return Err(BackendError::Stale { as_of, current });
        }

        let age = SystemTime::now().duration_since(as_of).unwrap_or_default();
        tracing::info!(flags = count, age_ms = age.as_millis() as u64, "Flags updated");
        self.base.handle_age(age);
        Ok(())
    }

    /// Report a failed refresh cycle. The served flags are left as they are.
    pub fn report_failure(&self, err: BackendError) {
        tracing::warn!(error = %err, "Flag refresh failed");
        self.base.handle_error(err);
    }

    /// Number of flags currently served.
    pub fn len(&self) -> usize {
        self.snapshot.load().flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Backend for StaticBackend {
    fn flag(&self, name: &str) -> BackendResult<FlagLookup> {
        let snapshot = self.snapshot.load();
        match snapshot.flags.get(name) {
            Some(flag) => {
                metrics::record_lookup("static", "ok");
                Ok(FlagLookup {
                    flag: flag.clone(),
                    updated_at: snapshot.updated_at,
                })
            }
            None => {
                tracing::debug!(flag = %name, "Unknown flag requested");
                metrics::record_lookup("static", "unknown");
                Err(BackendError::UnknownFlag {
                    name: name.to_string(),
                })
            }
        }
    }

    fn set_error_handler(&self, handler: Option<ErrorHandler>) {
        self.base.set_error_handler(handler);
    }

    fn set_age_callback(&self, callback: Option<AgeCallback>) {
        self.base.set_age_callback(callback);
    }

    fn close(&self) -> BackendResult<()> {
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!(flags = self.len(), "Static backend closed");
        }
        self.base.close()
    }
}

/// A flag that kept an update from being accepted.
#[derive(Debug, Clone)]
struct Rejection {
    name: String,
    reason: &'static str,
}

impl Rejection {
    fn into_error(self) -> BackendError {
        BackendError::InvalidFlag {
            name: self.name,
            reason: self.reason.to_string(),
        }
    }
}

fn build_flags<I>(flags: I) -> Result<HashMap<String, Arc<SampleFlag>>, Rejection>
where
    I: IntoIterator<Item = SampleFlag>,
{
    let mut map = HashMap::new();
    for flag in flags {
        if let Err(reason) = flag.check() {
            return Err(Rejection {
                name: flag.name,
                reason,
            });
        }
        if map.contains_key(&flag.name) {
            return Err(Rejection {
                name: flag.name,
                reason: "duplicate name",
            });
        }
        map.insert(flag.name.clone(), Arc::new(flag));
    }
    Ok(map)
}
