//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use flag_backend::{BackendError, ErrorHandler};

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_for<F>(timeout: Duration, mut cond: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}

/// Async variant of [`wait_for`] that yields to the runtime between polls.
#[allow(dead_code)]
pub async fn wait_for_async<F>(timeout: Duration, mut cond: F) -> bool
where
    F: FnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}

/// An error handler that records every error message it receives.
#[derive(Clone, Default)]
pub struct ErrorRecorder {
    calls: Arc<AtomicUsize>,
    messages: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl ErrorRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> ErrorHandler {
        let recorder = self.clone();
        Arc::new(move |err: BackendError| {
            recorder.messages.lock().unwrap().push(err.to_string());
            recorder.calls.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}
