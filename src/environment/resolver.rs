//! Environment resolution.
//!
//! Resolves the active environment of a request using the priority chain:
//! 1. Requested switch (`switch_env`), when it names an existing environment
//!    other than the session's
//! 2. The session's environment
//! 3. The default environment, which is then stored in the session
//!
//! Resolution never fails. An override naming an unknown environment is
//! ignored, the same as no override at all.

use std::fmt;

use crate::cache::CacheInvalidator;
use crate::session::{SessionSlot, ENVIRONMENT_KEY};

/// Checks whether a named environment has a loadable configuration bundle.
pub trait EnvironmentCatalog {
    /// True iff a configuration bundle exists for `env`.
    fn exists(&self, env: &str) -> bool;
}

impl<F> EnvironmentCatalog for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, env: &str) -> bool {
        self(env)
    }
}

/// How the environment was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The request switched the session to another environment.
    Switched,
    /// Kept from the session.
    Session,
    /// First request of the session, default environment.
    Default,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switched => write!(f, "switch_env request"),
            Self::Session => write!(f, "session"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Inputs of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRequest {
    /// Explicit override requested by the client.
    pub requested: Option<String>,
    /// Environment remembered by the session.
    pub session: Option<String>,
    /// Process-wide fallback.
    pub default: String,
}

impl EnvironmentRequest {
    /// Build a request. Empty strings count as absent.
    pub fn new(requested: Option<&str>, session: Option<&str>, default: &str) -> Self {
        Self {
            requested: non_empty(requested),
            session: non_empty(session),
            default: default.to_string(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// The environment serving a request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolutionResult {
    /// The environment name (e.g., "production", "test").
    pub environment: String,
    /// False exactly when the environment changed, meaning compiled
    /// artifacts of the previous environment must not be reused.
    pub cache_allowed: bool,
    /// How this environment was determined.
    pub source: ResolutionSource,
}

impl ResolutionResult {
    /// Decide the environment without touching any state.
    ///
    /// # Example
    ///
    /// ```
    /// use itop_boot::environment::{EnvironmentRequest, ResolutionResult, ResolutionSource};
    ///
    /// let exists = |env: &str| env == "qa";
    /// let request = EnvironmentRequest::new(Some("qa"), Some("staging"), "prod");
    /// let result = ResolutionResult::decide(&request, &exists);
    /// assert_eq!(result.environment, "qa");
    /// assert!(!result.cache_allowed);
    /// assert_eq!(result.source, ResolutionSource::Switched);
    /// ```
    pub fn decide(request: &EnvironmentRequest, catalog: &dyn EnvironmentCatalog) -> Self {
        // 1. Genuine switch
        if let (Some(requested), Some(current)) = (&request.requested, &request.session) {
            if requested != current && catalog.exists(requested) {
                return Self {
                    environment: requested.clone(),
                    cache_allowed: false,
                    source: ResolutionSource::Switched,
                };
            }
        }

        // 2. Session environment
        if let Some(current) = &request.session {
            return Self {
                environment: current.clone(),
                cache_allowed: true,
                source: ResolutionSource::Session,
            };
        }

        // 3. Default
        Self {
            environment: request.default.clone(),
            cache_allowed: true,
            source: ResolutionSource::Default,
        }
    }
}

/// Resolves environments against a session, applying the side effects.
pub struct EnvironmentResolver<'a> {
    default: &'a str,
    catalog: &'a dyn EnvironmentCatalog,
    invalidator: &'a dyn CacheInvalidator,
}

impl<'a> EnvironmentResolver<'a> {
    /// Create a resolver.
    pub fn new(
        default: &'a str,
        catalog: &'a dyn EnvironmentCatalog,
        invalidator: &'a dyn CacheInvalidator,
    ) -> Self {
        Self {
            default,
            catalog,
            invalidator,
        }
    }

    /// Resolve the environment of a request.
    ///
    /// On return the session's [`ENVIRONMENT_KEY`] slot always equals the
    /// returned environment. A switch invalidates compiled-artifact caches
    /// exactly once; an invalidation failure is logged and otherwise
    /// ignored.
    pub fn resolve(
        &self,
        requested: Option<&str>,
        session: &mut dyn SessionSlot,
    ) -> ResolutionResult {
        let current = session.get(ENVIRONMENT_KEY);
        let request = EnvironmentRequest::new(requested, current.as_deref(), self.default);
        let result = ResolutionResult::decide(&request, self.catalog);

        match result.source {
            ResolutionSource::Switched => {
                tracing::info!(
                    "Switching environment from {} to {}",
                    request.session.as_deref().unwrap_or_default(),
                    result.environment
                );
                session.set(ENVIRONMENT_KEY, &result.environment);
                if let Err(e) = self.invalidator.invalidate_all() {
                    tracing::warn!(
                        "Cache '{}' could not be invalidated: {:#}",
                        self.invalidator.name(),
                        e
                    );
                }
            }
            ResolutionSource::Default => {
                session.set(ENVIRONMENT_KEY, &result.environment);
            }
            ResolutionSource::Session => {
                if let Some(requested) = &request.requested {
                    if *requested != result.environment {
                        tracing::debug!(
                            "Ignoring switch to unknown environment '{}'",
                            requested
                        );
                    }
                }
            }
        }

        tracing::debug!(
            "Resolved environment {} ({}, cache allowed: {})",
            result.environment,
            result.source,
            result.cache_allowed
        );
        result
    }
}
