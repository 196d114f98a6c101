//! Metrics collection.
//!
//! # Metrics
//! - `flag_backend_dispatch_total` (counter): notifications delivered to a handler, by handler
//! - `flag_backend_dropped_total` (counter): notifications with no handler, or dropped before delivery
//! - `flag_backend_lookup_total` (counter): lookups by backend and outcome

use metrics::counter;

/// Record a notification about to run its handler.
pub fn record_dispatch(handler: &'static str) {
    counter!("flag_backend_dispatch_total", "handler" => handler).increment(1);
}

/// Record a notification that never reached a handler.
pub fn record_dropped(handler: &'static str) {
    counter!("flag_backend_dropped_total", "handler" => handler).increment(1);
}

/// Record a flag lookup.
pub fn record_lookup(backend: &'static str, outcome: &'static str) {
    counter!("flag_backend_lookup_total", "backend" => backend, "outcome" => outcome).increment(1);
}
