//! Rate-sampled flag.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::flag::Flag;

/// A flag that activates for `rate` of all evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleFlag {
    pub name: String,
    pub rate: f64,
}

impl SampleFlag {
    /// Create a new sample flag.
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// A flag that never activates.
    pub fn off(name: impl Into<String>) -> Self {
        Self::new(name, 0.0)
    }

    /// Reject flags a backend should not serve.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is empty");
        }
        if !(0.0..=1.0).contains(&self.rate) {
            return Err("rate must be within [0, 1]");
        }
        Ok(())
    }
}

impl Flag for SampleFlag {
    fn name(&self) -> &str {
        &self.name
    }

    fn rate(&self) -> f64 {
        self.rate
    }
}

/// Draw once against `rate`. NaN and non-positive rates never activate.
pub(crate) fn sample_rate(rate: f64) -> bool {
    if rate.is_nan() || rate <= 0.0 {
        return false;
    }
    if rate >= 1.0 {
        return true;
    }
    rand::thread_rng().gen_bool(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_flag_never_enabled() {
        let flag = SampleFlag::off("checkout");
        assert_eq!(flag.name(), "checkout");
        assert_eq!(flag.rate(), 0.0);
        assert!((0..1000).all(|_| !flag.is_enabled()));
    }

    #[test]
    fn test_full_rate_always_enabled() {
        let flag = SampleFlag::new("checkout", 1.0);
        assert!((0..1000).all(|_| flag.is_enabled()));
    }

    #[test]
    fn test_out_of_range_rates_are_clamped() {
        assert!(!sample_rate(f64::NAN));
        assert!(!sample_rate(-0.5));
        assert!(sample_rate(7.0));
    }

    #[test]
    fn test_check() {
        assert!(SampleFlag::new("a", 0.3).check().is_ok());
        assert_eq!(SampleFlag::new(" ", 0.3).check(), Err("name is empty"));
        assert!(SampleFlag::new("a", 1.5).check().is_err());
        assert!(SampleFlag::new("a", f64::NAN).check().is_err());
    }

    #[test]
    fn test_partial_rate_mixes() {
        let flag = SampleFlag::new("half", 0.5);
        let hits = (0..10_000).filter(|_| flag.is_enabled()).count();
        assert!(hits > 3_000 && hits < 7_000, "hits = {}", hits);
    }
}
