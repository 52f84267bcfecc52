//! On-disk store for compiled artifacts.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::entry::ArtifactEntry;
use super::invalidator::CacheInvalidator;

/// Storage for compiled data-model artifacts.
pub struct ArtifactCache {
    /// Root directory for cache.
    root: PathBuf,
}

impl ArtifactCache {
    /// Create a new cache.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }

    /// Get the path for storing an artifact's content.
    pub fn content_path(&self, environment: &str, name: &str) -> PathBuf {
        let key = format!("{}:{}", environment, name);
        let hash = Sha256::digest(key.as_bytes());
        self.root.join(hex::encode(&hash[..16]))
    }

    /// Get the metadata file path for an artifact.
    fn metadata_path(&self, environment: &str, name: &str) -> PathBuf {
        self.content_path(environment, name)
            .with_extension("meta.json")
    }

    /// Store compiled content and return its entry.
    pub fn store(&self, environment: &str, name: &str, content: &str) -> Result<ArtifactEntry> {
        self.ensure_dir()?;

        let content_path = self.content_path(environment, name);
        fs::write(&content_path, content)
            .with_context(|| format!("Failed to write artifact to {:?}", content_path))?;

        let entry =
            ArtifactEntry::new(environment, name, &content_path).with_size(content.len() as u64);

        let meta_path = self.metadata_path(environment, name);
        fs::write(&meta_path, serde_json::to_string_pretty(&entry)?)?;

        Ok(entry)
    }

    /// Load an artifact's metadata.
    pub fn load(&self, environment: &str, name: &str) -> Result<Option<ArtifactEntry>> {
        let meta_path = self.metadata_path(environment, name);

        if !meta_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&meta_path)?;
        let entry: ArtifactEntry = serde_json::from_str(&json)?;

        Ok(Some(entry))
    }

    /// Read the cached content.
    pub fn read_content(&self, entry: &ArtifactEntry) -> Result<String> {
        fs::read_to_string(&entry.content_path).with_context(|| {
            format!(
                "Failed to read cached artifact from {:?}",
                entry.content_path
            )
        })
    }

    /// Remove a cached artifact.
    ///
    /// The metadata goes first, so a removal that stops halfway never
    /// leaves a loadable entry behind.
    pub fn remove(&self, environment: &str, name: &str) -> Result<bool> {
        let content_path = self.content_path(environment, name);
        let meta_path = self.metadata_path(environment, name);

        let mut removed = false;

        if meta_path.exists() {
            fs::remove_file(&meta_path)
                .with_context(|| format!("Failed to remove {:?}", meta_path))?;
            removed = true;
        }

        if content_path.exists() {
            fs::remove_file(&content_path)
                .with_context(|| format!("Failed to remove {:?}", content_path))?;
            removed = true;
        }

        Ok(removed)
    }

    /// List all cached artifacts, newest first.
    pub fn list(&self) -> Result<Vec<ArtifactEntry>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();

            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(json) = fs::read_to_string(&path) {
                    if let Ok(artifact) = serde_json::from_str::<ArtifactEntry>(&json) {
                        entries.push(artifact);
                    }
                }
            }
        }

        entries.sort_by(|a, b| b.metadata.compiled_at.cmp(&a.metadata.compiled_at));
        Ok(entries)
    }

    /// Clear all cached artifacts.
    ///
    /// Every entry is attempted; the first failure is returned afterwards.
    pub fn clear(&self) -> Result<usize> {
        let mut count = 0;
        let mut first_error = None;

        for entry in self.list()? {
            match self.remove(&entry.environment, &entry.name) {
                Ok(_) => count += 1,
                Err(e) => {
                    tracing::warn!("Failed to remove artifact {}: {:#}", entry.name, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }

    /// Get total cache size in bytes.
    pub fn total_size(&self) -> Result<u64> {
        let entries = self.list()?;
        Ok(entries.iter().map(|e| e.metadata.size_bytes).sum())
    }
}

impl CacheInvalidator for ArtifactCache {
    fn name(&self) -> &str {
        "artifacts"
    }

    fn invalidate_all(&self) -> Result<()> {
        let removed = self.clear()?;
        tracing::info!("Dropped {} compiled artifact(s) from {:?}", removed, self.root);
        Ok(())
    }
}
