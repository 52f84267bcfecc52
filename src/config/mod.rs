//! Settings loading and the environment catalog.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Configuration directories per environment in [`catalog`]
//!
//! # Example
//!
//! ```
//! use itop_boot::config::load_settings_with_override;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("itop-boot.yml"), "default_environment: test").unwrap();
//!
//! let settings = load_settings_with_override(temp.path(), None, None).unwrap();
//! assert_eq!(settings.default_environment, "test");
//! ```
//!
//! # Settings File Locations
//!
//! Merged in this order:
//! 1. `<app_root>/itop-boot.yml` (or `--config`)
//! 2. `<app_root>/itop-boot.local.yml`
//! 3. `ITOP_BOOT_DEFAULT_ENV` for the default environment

pub mod catalog;
pub mod loader;
pub mod merger;
pub mod schema;

pub use catalog::{is_valid_environment_name, ConfigDirCatalog};
pub use loader::{
    load_settings, load_settings_value, load_settings_with_override, SettingsPaths,
    DEFAULT_ENV_VAR, LOCAL_SETTINGS_FILE, SETTINGS_FILE,
};
pub use merger::{deep_merge, merge_layers};
pub use schema::{AppSettings, MaintenanceMessages, ResourceLimits};
