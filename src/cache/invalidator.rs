//! Cache invalidation hooks.

use anyhow::Result;

/// A process-wide cache that can be flushed when the environment changes.
///
/// Implementations must be idempotent: concurrent requests switching
/// environment may call `invalidate_all` redundantly.
pub trait CacheInvalidator {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Drop every cached artifact.
    fn invalidate_all(&self) -> Result<()>;
}

/// Invalidator for hosts without any compiled-artifact cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn name(&self) -> &str {
        "none"
    }

    fn invalidate_all(&self) -> Result<()> {
        Ok(())
    }
}

/// Runs several invalidators in order.
///
/// Every hook runs even when an earlier one fails; the first failure is
/// returned once all hooks have been attempted.
#[derive(Default)]
pub struct CompositeInvalidator {
    hooks: Vec<Box<dyn CacheInvalidator + Send + Sync>>,
}

impl CompositeInvalidator {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook.
    pub fn with(mut self, hook: impl CacheInvalidator + Send + Sync + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl CacheInvalidator for CompositeInvalidator {
    fn name(&self) -> &str {
        "composite"
    }

    fn invalidate_all(&self) -> Result<()> {
        let mut first_error = None;
        for hook in &self.hooks {
            match hook.invalidate_all() {
                Ok(()) => tracing::debug!("Invalidated cache '{}'", hook.name()),
                Err(e) => {
                    tracing::warn!("Failed to invalidate cache '{}': {:#}", hook.name(), e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
