//! Request startup.
//!
//! Runs the steps every request goes through before the data model is
//! loaded:
//!
//! 1. Maintenance gate
//! 2. Environment resolution against the session
//! 3. Lookup of the resolved environment's configuration bundle
//!
//! The outcome is either a maintenance response to send as-is, or a
//! [`StartupPlan`] telling the loader which bundle to load and whether its
//! compiled artifacts may be reused.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cache::{ArtifactCache, CacheInvalidator, CompositeInvalidator};
use crate::config::{AppSettings, ConfigDirCatalog};
use crate::environment::{EnvironmentResolver, ResolutionResult, ResolutionSource};
use crate::error::Result;
use crate::maintenance::{MaintenanceGate, MaintenanceResponse};
use crate::request::Request;
use crate::session::{SessionName, SessionSlot, SessionStore};

/// What the data-model loader needs to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupPlan {
    /// Resolved environment.
    pub environment: String,
    /// Configuration bundle of that environment.
    pub config_file: PathBuf,
    /// Whether previously compiled artifacts may be reused.
    pub cache_allowed: bool,
    /// How the environment was chosen.
    pub source: ResolutionSource,
}

/// Outcome of starting a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Startup {
    /// Maintenance mode is on; send this response and stop.
    Maintenance(MaintenanceResponse),
    /// Proceed with loading the data model.
    Ready(StartupPlan),
}

/// Bootstraps requests for one application root.
pub struct Bootstrap {
    app_root: PathBuf,
    settings: AppSettings,
    catalog: ConfigDirCatalog,
    gate: MaintenanceGate,
    invalidator: Box<dyn CacheInvalidator + Send + Sync>,
}

impl Bootstrap {
    /// Create a bootstrap for `app_root`.
    ///
    /// Environment switches invalidate the on-disk artifact cache.
    pub fn new(app_root: impl Into<PathBuf>, settings: AppSettings) -> Self {
        let app_root = app_root.into();
        let catalog =
            ConfigDirCatalog::new(settings.config_root(&app_root), &settings.config_file);
        let gate = MaintenanceGate::new(settings.maintenance_flag(&app_root));
        let invalidator = CompositeInvalidator::new()
            .with(ArtifactCache::new(settings.artifact_cache_root(&app_root)));

        Self {
            app_root,
            settings,
            catalog,
            gate,
            invalidator: Box::new(invalidator),
        }
    }

    /// Replace the cache invalidation hooks.
    pub fn with_invalidator(
        mut self,
        invalidator: impl CacheInvalidator + Send + Sync + 'static,
    ) -> Self {
        self.invalidator = Box::new(invalidator);
        self
    }

    /// Application root.
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Effective settings.
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Environment catalog.
    pub fn catalog(&self) -> &ConfigDirCatalog {
        &self.catalog
    }

    /// Maintenance gate.
    pub fn gate(&self) -> &MaintenanceGate {
        &self.gate
    }

    /// Session store for this application root.
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(
            self.settings.session_root(&self.app_root),
            SessionName::for_app_root(&self.app_root),
        )
    }

    /// On-disk compiled-artifact cache.
    pub fn artifact_cache(&self) -> ArtifactCache {
        ArtifactCache::new(self.settings.artifact_cache_root(&self.app_root))
    }

    /// Resolve the environment of `request` against `session`.
    pub fn resolve(&self, request: &Request, session: &mut dyn SessionSlot) -> ResolutionResult {
        EnvironmentResolver::new(
            &self.settings.default_environment,
            &self.catalog,
            &*self.invalidator,
        )
        .resolve(request.switch_env(), session)
    }

    /// Start a request.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when the resolved environment has no
    /// configuration bundle. The session still records the environment.
    pub fn start(&self, request: &Request, session: &mut dyn SessionSlot) -> Result<Startup> {
        if let Some(response) = self.gate.check(request, &self.settings.maintenance) {
            return Ok(Startup::Maintenance(response));
        }

        let resolution = self.resolve(request, session);
        let config_file = self.catalog.config_file_for(&resolution.environment)?;

        Ok(Startup::Ready(StartupPlan {
            environment: resolution.environment,
            config_file,
            cache_allowed: resolution.cache_allowed,
            source: resolution.source,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::NoopInvalidator;
    use crate::error::BootError;
    use crate::maintenance::ResponseFormat;
    use crate::session::{MemorySession, ENVIRONMENT_KEY};
    use std::fs;
    use tempfile::TempDir;

    fn app_with(envs: &[&str]) -> (TempDir, Bootstrap) {
        let temp = TempDir::new().unwrap();
        for env in envs {
            let dir = temp.path().join("conf").join(env);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("config-itop.php"), "<?php").unwrap();
        }
        let bootstrap = Bootstrap::new(temp.path(), AppSettings::default());
        (temp, bootstrap)
    }

    fn ready(startup: Startup) -> StartupPlan {
        match startup {
            Startup::Ready(plan) => plan,
            Startup::Maintenance(_) => panic!("Expected Ready"),
        }
    }

    #[test]
    fn first_request_uses_default() {
        let (temp, bootstrap) = app_with(&["production"]);
        let mut session = MemorySession::new();

        let plan = ready(bootstrap.start(&Request::new(), &mut session).unwrap());

        assert_eq!(plan.environment, "production");
        assert!(plan.cache_allowed);
        assert_eq!(
            plan.config_file,
            temp.path().join("conf/production/config-itop.php")
        );
        assert_eq!(session.get(ENVIRONMENT_KEY).as_deref(), Some("production"));
    }

    #[test]
    fn switch_invalidates_artifact_cache() {
        let (temp, bootstrap) = app_with(&["production", "test"]);
        let cache = bootstrap.artifact_cache();
        assert_eq!(cache.root(), temp.path().join("data/cache"));
        cache.store("production", "model", "compiled").unwrap();

        let mut session = MemorySession::with_value(ENVIRONMENT_KEY, "production");
        let request = Request::new().with_param("switch_env", "test");
        let plan = ready(bootstrap.start(&request, &mut session).unwrap());

        assert_eq!(plan.environment, "test");
        assert!(!plan.cache_allowed);
        assert_eq!(plan.source, ResolutionSource::Switched);
        assert!(cache.list().unwrap().is_empty());
    }

    #[test]
    fn switch_to_unknown_environment_keeps_session() {
        let (temp, bootstrap) = app_with(&["production"]);
        let cache = ArtifactCache::new(temp.path().join("data/cache"));
        cache.store("production", "model", "compiled").unwrap();

        let mut session = MemorySession::with_value(ENVIRONMENT_KEY, "production");
        let request = Request::new().with_param("switch_env", "ghost");
        let plan = ready(bootstrap.start(&request, &mut session).unwrap());

        assert_eq!(plan.environment, "production");
        assert!(plan.cache_allowed);
        assert_eq!(cache.list().unwrap().len(), 1);
    }

    #[test]
    fn missing_bundle_is_reported_by_lookup() {
        let (_temp, bootstrap) = app_with(&[]);
        let mut session = MemorySession::new();

        let err = bootstrap.start(&Request::new(), &mut session).unwrap_err();

        assert!(matches!(err, BootError::ConfigNotFound { .. }));
        assert_eq!(session.get(ENVIRONMENT_KEY).as_deref(), Some("production"));
    }

    #[test]
    fn maintenance_short_circuits_before_session() {
        let (_temp, bootstrap) = app_with(&["production"]);
        bootstrap.gate().enable().unwrap();
        let mut session = MemorySession::new();

        let startup = bootstrap
            .start(&Request::new().with_content_type("application/json"), &mut session)
            .unwrap();

        match startup {
            Startup::Maintenance(response) => {
                assert_eq!(response.status, 503);
                assert_eq!(response.format, ResponseFormat::Json);
            }
            Startup::Ready(_) => panic!("Expected Maintenance"),
        }
        assert!(session.is_empty());
    }

    #[test]
    fn maintenance_bypass_boots_normally() {
        let (_temp, bootstrap) = app_with(&["production"]);
        bootstrap.gate().enable().unwrap();
        let mut session = MemorySession::new();

        let request = Request::new().with_param("maintenance", "1");
        let plan = ready(bootstrap.start(&request, &mut session).unwrap());
        assert_eq!(plan.environment, "production");
    }

    #[test]
    fn session_store_is_namespaced_by_app_root() {
        let (temp, bootstrap) = app_with(&[]);
        let store = bootstrap.session_store();
        assert!(store.path().starts_with(temp.path().join("data/sessions")));
        assert_eq!(store.name(), &SessionName::for_app_root(temp.path()));
    }

    #[test]
    fn custom_invalidator_replaces_default() {
        let (temp, bootstrap) = app_with(&["production", "test"]);
        let bootstrap = bootstrap.with_invalidator(NoopInvalidator);
        let cache = ArtifactCache::new(temp.path().join("data/cache"));
        cache.store("production", "model", "compiled").unwrap();

        let mut session = MemorySession::with_value(ENVIRONMENT_KEY, "production");
        let request = Request::new().with_param("switch_env", "test");
        bootstrap.start(&request, &mut session).unwrap();

        assert_eq!(cache.list().unwrap().len(), 1);
    }
}
