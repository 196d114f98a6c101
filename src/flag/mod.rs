//! Flag values returned by backends.
//!
//! # Data Flow
//! ```text
//! Backend::flag(name)
//!     → FlagLookup { flag: Arc<dyn Flag>, updated_at }
//!     → caller samples flag.is_enabled()
//! ```
//!
//! # Design Decisions
//! - Flags are immutable once handed out; backends swap whole snapshots
//! - Evaluation is a single activation rate, sampled per call

pub mod sample;

pub use sample::SampleFlag;

use std::fmt;

/// A named flag with an activation rate.
pub trait Flag: fmt::Debug + Send + Sync {
    /// The flag name as requested from the backend.
    fn name(&self) -> &str;

    /// Fraction of evaluations that should be active, in `[0, 1]`.
    fn rate(&self) -> f64;

    /// Sample the flag once.
    fn is_enabled(&self) -> bool {
        sample::sample_rate(self.rate())
    }
}
