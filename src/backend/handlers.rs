//! Callback types registered on a backend.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::BackendError;

/// Called with every internal error a backend encounters.
pub type ErrorHandler = Arc<dyn Fn(BackendError) + Send + Sync + 'static>;

/// Called with the age of the backend data after each refresh.
pub type AgeCallback = Arc<dyn Fn(AgeSource, Duration) + Send + Sync + 'static>;

/// Tag identifying where an age measurement came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgeSource(&'static str);

impl AgeSource {
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The tag every backend passes to its age callback.
pub const AGE_SOURCE: AgeSource = AgeSource("flag-backend");
