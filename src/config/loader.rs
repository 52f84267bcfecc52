//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_layers;
use crate::config::schema::AppSettings;
use crate::error::{BootError, Result};

/// Settings file name, looked up in the application root.
pub const SETTINGS_FILE: &str = "itop-boot.yml";

/// Local overrides, merged on top of [`SETTINGS_FILE`].
pub const LOCAL_SETTINGS_FILE: &str = "itop-boot.local.yml";

/// Environment variable overriding `default_environment`.
pub const DEFAULT_ENV_VAR: &str = "ITOP_BOOT_DEFAULT_ENV";

/// Settings files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct SettingsPaths {
    /// Main settings: `<app_root>/itop-boot.yml` or an explicit path.
    pub main: Option<PathBuf>,

    /// Local overrides: `<app_root>/itop-boot.local.yml`
    pub local: Option<PathBuf>,
}

impl SettingsPaths {
    /// Discover settings files for the given application root.
    pub fn discover(app_root: &Path) -> Self {
        Self {
            main: existing(app_root.join(SETTINGS_FILE)),
            local: existing(app_root.join(LOCAL_SETTINGS_FILE)),
        }
    }

    /// Returns all existing paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.main.iter().chain(self.local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a settings file as a raw YAML value (for merging).
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BootError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BootError::Io(e)
        }
    })?;

    // An empty file is a valid, empty layer
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }

    serde_yaml::from_str(&content).map_err(|e| BootError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load, merge and validate the settings of an application root.
///
/// `explicit` replaces the discovered main settings file and must exist.
/// The [`DEFAULT_ENV_VAR`] environment variable wins over every file.
pub fn load_settings(app_root: &Path, explicit: Option<&Path>) -> Result<AppSettings> {
    let env_default = std::env::var(DEFAULT_ENV_VAR).ok();
    load_settings_with_override(app_root, explicit, env_default.as_deref())
}

/// Same as [`load_settings`] with the environment override passed in.
pub fn load_settings_with_override(
    app_root: &Path,
    explicit: Option<&Path>,
    default_env: Option<&str>,
) -> Result<AppSettings> {
    let mut paths = SettingsPaths::discover(app_root);
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(BootError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        paths.main = Some(path.to_path_buf());
    }

    let mut layers = Vec::new();
    for path in paths.all_existing() {
        tracing::debug!("Loading settings from {:?}", path);
        layers.push(load_settings_value(path)?);
    }

    let merged = merge_layers(&layers);
    let mut settings: AppSettings =
        serde_yaml::from_value(merged).map_err(|e| BootError::ConfigParseError {
            path: paths
                .all_existing()
                .last()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| app_root.join(SETTINGS_FILE)),
            message: e.to_string(),
        })?;

    if let Some(env) = default_env.filter(|e| !e.trim().is_empty()) {
        tracing::debug!("Default environment overridden by {}: {}", DEFAULT_ENV_VAR, env);
        settings.default_environment = env.to_string();
    }

    settings.validate()?;
    Ok(settings)
}
