//! Pluggable feature-flag backends.
//!
//! A [`Backend`] answers flag lookups and reports refresh errors and data age
//! through callbacks registered on it. Concrete backends embed a
//! [`BackendBase`] for handler registration and dispatch.

pub mod backend;
pub mod config;
pub mod flag;
pub mod observability;

pub use backend::{
    AgeCallback, AgeSource, Backend, BackendBase, BackendError, ErrorHandler, FlagLookup,
    OffBackend, StaticBackend, AGE_SOURCE,
};
pub use config::FlagConfig;
pub use flag::{Flag, SampleFlag};
