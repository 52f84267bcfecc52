//! Filesystem catalog of configuration environments.
//!
//! Layout: `<config_root>/<environment>/<config_file>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::environment::EnvironmentCatalog;
use crate::error::{BootError, Result};

/// Whether `name` can safely be used as a directory name under the
/// configuration root.
pub fn is_valid_environment_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Environments backed by configuration directories.
#[derive(Debug, Clone)]
pub struct ConfigDirCatalog {
    root: PathBuf,
    config_file: String,
}

impl ConfigDirCatalog {
    /// Create a catalog over `root`, where every environment keeps its
    /// bundle in a file named `config_file`.
    pub fn new(root: impl Into<PathBuf>, config_file: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            config_file: config_file.into(),
        }
    }

    /// The configuration root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the bundle of `env` lives, whether or not it exists.
    pub fn bundle_path(&self, env: &str) -> PathBuf {
        self.root.join(env).join(&self.config_file)
    }

    /// Path of the loadable bundle for `env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when the environment has no bundle.
    pub fn config_file_for(&self, env: &str) -> Result<PathBuf> {
        let path = self.bundle_path(env);
        if is_valid_environment_name(env) && path.is_file() {
            Ok(path)
        } else {
            Err(BootError::ConfigNotFound { path })
        }
    }

    /// All environments with a loadable bundle, sorted by name.
    pub fn environments(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.exists(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

impl EnvironmentCatalog for ConfigDirCatalog {
    fn exists(&self, env: &str) -> bool {
        is_valid_environment_name(env) && self.bundle_path(env).is_file()
    }
}
