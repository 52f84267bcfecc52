//! Cache entry and metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A compiled artifact stored in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Environment the artifact was compiled for.
    pub environment: String,
    /// Artifact name within the environment (e.g. "model.compiled").
    pub name: String,
    /// Path to the cached content.
    pub content_path: PathBuf,
    /// Bookkeeping for listing and stats.
    pub metadata: ArtifactMetadata,
}

/// Metadata recorded alongside an artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// When this artifact was compiled into the cache.
    pub compiled_at: DateTime<Utc>,
    /// Size in bytes.
    pub size_bytes: u64,
}

impl ArtifactEntry {
    /// Create a new entry.
    pub fn new(
        environment: impl Into<String>,
        name: impl Into<String>,
        content_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            environment: environment.into(),
            name: name.into(),
            content_path: content_path.into(),
            metadata: ArtifactMetadata {
                compiled_at: Utc::now(),
                size_bytes: 0,
            },
        }
    }

    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.metadata.compiled_at)
    }

    /// Set size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.metadata.size_bytes = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_zero_size() {
        let entry = ArtifactEntry::new("production", "model.compiled", "/tmp/x");
        assert_eq!(entry.environment, "production");
        assert_eq!(entry.metadata.size_bytes, 0);
    }

    #[test]
    fn with_size_sets_size() {
        let entry = ArtifactEntry::new("production", "model.compiled", "/tmp/x").with_size(42);
        assert_eq!(entry.metadata.size_bytes, 42);
    }

    #[test]
    fn fresh_entry_is_young() {
        let entry = ArtifactEntry::new("test", "dict", "/tmp/x");
        assert!(entry.age().num_seconds() < 2);
    }
}
