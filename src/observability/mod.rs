//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Backends and handler dispatch produce:
//!     → tracing events (structured fields)
//!     → metrics.rs (counters via the `metrics` facade)
//!
//! Consumers:
//!     → logging.rs installs a subscriber for binaries
//!     → Embedding applications install their own metrics recorder
//! ```
//!
//! # Design Decisions
//! - The library never installs a global subscriber or recorder by itself
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
