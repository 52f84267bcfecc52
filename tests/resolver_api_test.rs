//! Environment resolution through the public API.

use std::cell::Cell;

use itop_boot::cache::CacheInvalidator;
use itop_boot::environment::{EnvironmentResolver, ResolutionSource};
use itop_boot::session::{MemorySession, SessionSlot, ENVIRONMENT_KEY};

#[derive(Default)]
struct Counter {
    calls: Cell<usize>,
}

impl CacheInvalidator for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn invalidate_all(&self) -> anyhow::Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

fn known(env: &str) -> bool {
    matches!(env, "production" | "test" | "demo")
}

#[test]
fn resolved_environment_is_always_known_or_default() {
    let counter = Counter::default();
    let catalog = known;
    let resolver = EnvironmentResolver::new("production", &catalog, &counter);

    let requests = [None, Some(""), Some("test"), Some("ghost"), Some("../etc")];
    let sessions = [None, Some("production"), Some("test"), Some("demo")];

    for requested in requests {
        for current in sessions {
            let mut session = match current {
                Some(env) => MemorySession::with_value(ENVIRONMENT_KEY, env),
                None => MemorySession::new(),
            };
            let result = resolver.resolve(requested, &mut session);

            if result.source == ResolutionSource::Switched {
                assert!(known(&result.environment));
                assert_eq!(Some(result.environment.as_str()), requested);
            }
            assert_eq!(
                session.get(ENVIRONMENT_KEY).as_deref(),
                Some(result.environment.as_str())
            );
            assert_eq!(
                result.cache_allowed,
                result.source != ResolutionSource::Switched
            );
        }
    }
}

#[test]
fn invalidation_happens_once_per_switch() {
    let counter = Counter::default();
    let catalog = known;
    let resolver = EnvironmentResolver::new("production", &catalog, &counter);
    let mut session = MemorySession::with_value(ENVIRONMENT_KEY, "production");

    resolver.resolve(Some("test"), &mut session);
    resolver.resolve(Some("test"), &mut session);
    resolver.resolve(None, &mut session);
    resolver.resolve(Some("demo"), &mut session);

    assert_eq!(counter.calls.get(), 2);
    assert_eq!(session.get(ENVIRONMENT_KEY).as_deref(), Some("demo"));
}

#[test]
fn first_request_ignores_switch() {
    let counter = Counter::default();
    let catalog = known;
    let resolver = EnvironmentResolver::new("production", &catalog, &counter);
    let mut session = MemorySession::new();

    let result = resolver.resolve(Some("test"), &mut session);

    assert_eq!(result.environment, "production");
    assert_eq!(result.source, ResolutionSource::Default);
    assert!(result.cache_allowed);
    assert_eq!(counter.calls.get(), 0);
}
