//! Settings schema.
//!
//! Every field has a default, so an application root without any settings
//! file still boots with the stock iTop layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BootError, Result};

use super::catalog::is_valid_environment_name;

/// Process-wide bootstrap settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Environment used by sessions that never selected one.
    pub default_environment: String,

    /// Directory (relative to the app root) holding one sub-directory per
    /// environment.
    pub config_dir: PathBuf,

    /// File name of an environment's configuration bundle.
    pub config_file: String,

    /// Directory (relative to the app root) where sessions are stored.
    pub session_dir: PathBuf,

    /// Directory (relative to the app root) for compiled artifacts.
    pub artifact_cache_dir: PathBuf,

    /// Flag file (relative to the app root) that turns maintenance mode on.
    pub maintenance_file: PathBuf,

    /// Texts shown while in maintenance.
    pub maintenance: MaintenanceMessages,

    /// Runtime limits quoted in fatal error messages.
    pub limits: ResourceLimits,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_environment: "production".to_string(),
            config_dir: PathBuf::from("conf"),
            config_file: "config-itop.php".to_string(),
            session_dir: PathBuf::from("data/sessions"),
            artifact_cache_dir: PathBuf::from("data/cache"),
            maintenance_file: PathBuf::from(".maintenance"),
            maintenance: MaintenanceMessages::default(),
            limits: ResourceLimits::default(),
        }
    }
}

impl AppSettings {
    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.default_environment.trim().is_empty() {
            return Err(BootError::ConfigValidationError {
                message: "default_environment must not be empty".to_string(),
            });
        }
        if !is_valid_environment_name(&self.default_environment) {
            return Err(BootError::ConfigValidationError {
                message: format!(
                    "default_environment '{}' is not a valid environment name",
                    self.default_environment
                ),
            });
        }
        if self.config_file.trim().is_empty() {
            return Err(BootError::ConfigValidationError {
                message: "config_file must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Absolute directory holding the environments.
    pub fn config_root(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.config_dir)
    }

    /// Absolute session directory.
    pub fn session_root(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.session_dir)
    }

    /// Absolute artifact cache directory.
    pub fn artifact_cache_root(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.artifact_cache_dir)
    }

    /// Absolute path of the maintenance flag file.
    pub fn maintenance_flag(&self, app_root: &Path) -> PathBuf {
        app_root.join(&self.maintenance_file)
    }
}

/// Title and message of the maintenance page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceMessages {
    pub title: String,
    pub message: String,
}

impl Default for MaintenanceMessages {
    fn default() -> Self {
        Self {
            title: "Maintenance".to_string(),
            message: "Application is currently in maintenance".to_string(),
        }
    }
}

/// Limits of the hosting runtime, as an operator would configure them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceLimits {
    pub memory_limit: String,
    pub max_execution_time: String,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            memory_limit: "256M".to_string(),
            max_execution_time: "300".to_string(),
        }
    }
}
