//! Backend where every flag is off.

use std::sync::Arc;

use crate::backend::{
    AgeCallback, Backend, BackendBase, BackendResult, ErrorHandler, FlagLookup,
};
use crate::flag::SampleFlag;
use crate::observability::metrics;

/// Serves a rate-0 flag for every name, with no update time.
///
/// Swapping this in for a real backend turns off every flag-gated path.
/// It never reports errors or ages since there is nothing to refresh.
#[derive(Debug, Default)]
pub struct OffBackend {
    base: BackendBase,
}

impl OffBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for OffBackend {
    fn flag(&self, name: &str) -> BackendResult<FlagLookup> {
        metrics::record_lookup("off", "ok");
        Ok(FlagLookup {
            flag: Arc::new(SampleFlag::off(name)),
            updated_at: None,
        })
    }

    fn set_error_handler(&self, handler: Option<ErrorHandler>) {
        self.base.set_error_handler(handler);
    }

    fn set_age_callback(&self, callback: Option<AgeCallback>) {
        self.base.set_age_callback(callback);
    }

    fn close(&self) -> BackendResult<()> {
        self.base.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AgeSource, BackendError, AGE_SOURCE};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[test]
    fn test_every_name_is_off() {
        let backend = OffBackend::new();
        for name in ["login-rollout", "", "new-checkout", "ünïcode"] {
            let lookup = backend.flag(name).unwrap();
            assert_eq!(lookup.flag.name(), name);
            assert_eq!(lookup.flag.rate(), 0.0);
            assert!(!lookup.flag.is_enabled());
            assert!(lookup.updated_at.is_none());
        }
    }

    #[test]
    fn test_close_twice() {
        let backend = OffBackend::new();
        assert!(backend.close().is_ok());
        assert!(backend.close().is_ok());
        assert!(backend.flag("after-close").is_ok());
    }

    #[test]
    fn test_age_dispatch_through_embedded_base() {
        let backend = OffBackend::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));

        let (c, s) = (calls.clone(), seen.clone());
        backend.set_age_callback(Some(Arc::new(move |source: AgeSource, age: Duration| {
            *s.lock().unwrap() = Some((source, age));
            c.fetch_add(1, Ordering::SeqCst);
        })));

        backend.base.handle_age(Duration::from_secs(5));

        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *seen.lock().unwrap(),
            Some((AGE_SOURCE, Duration::from_secs(5)))
        );
    }

    #[test]
    fn test_lookup_never_reports() {
        let backend = OffBackend::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        backend.set_error_handler(Some(Arc::new(move |_: BackendError| {
            c.fetch_add(1, Ordering::SeqCst);
        })));

        for i in 0..100 {
            backend.flag(&format!("flag-{}", i)).unwrap();
        }
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
