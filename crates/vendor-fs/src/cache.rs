//! Execution-cache invalidation for generated files
//!
//! Hosts that evaluate generated artifacts may keep a compiled copy of them
//! around. Stores call the configured [`CacheInvalidator`] before reading
//! and after writing such a file. Invalidation is best-effort: a failure is
//! logged and never aborts the surrounding operation.

use std::fmt;

use crate::NormalizedPath;

/// Drops any cached, pre-evaluated form of a generated file.
pub trait CacheInvalidator: fmt::Debug + Send + Sync {
    fn invalidate(&self, path: &NormalizedPath) -> std::io::Result<()>;
}

/// Invalidator for hosts without an execution cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate(&self, _path: &NormalizedPath) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `invalidator` for `path`, suppressing any failure.
pub fn invalidate_quietly(invalidator: &dyn CacheInvalidator, path: &NormalizedPath) {
    if let Err(e) = invalidator.invalidate(path) {
        tracing::debug!(path = %path, error = %e, "Cache invalidation failed, ignoring");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Failing;

    impl CacheInvalidator for Failing {
        fn invalidate(&self, _path: &NormalizedPath) -> std::io::Result<()> {
            Err(std::io::Error::other("cache offline"))
        }
    }

    #[test]
    fn failures_are_suppressed() {
        invalidate_quietly(&Failing, &NormalizedPath::new("/tmp/x.toml"));
    }

    #[test]
    fn noop_always_succeeds() {
        assert!(NoopInvalidator.invalidate(&NormalizedPath::new("x")).is_ok());
    }
}
