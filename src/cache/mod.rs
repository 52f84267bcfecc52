//! Compiled-artifact caching.
//!
//! Compiled data-model artifacts are stored per environment on disk. When
//! a session switches environment, every process-wide cache that may hold
//! artifacts compiled under the previous environment is invalidated through
//! the [`CacheInvalidator`] hooks.

pub mod entry;
pub mod invalidator;
pub mod store;

pub use entry::{ArtifactEntry, ArtifactMetadata};
pub use invalidator::{CacheInvalidator, CompositeInvalidator, NoopInvalidator};
pub use store::ArtifactCache;
