//! Fatal error reporting.
//!
//! When a request dies on a runtime limit, the operator needs to know which
//! limit to raise. Fatal messages are classified and turned into a
//! short hint for the person looking at the page.

use std::fmt;

use crate::config::ResourceLimits;

/// What kind of fatal error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalKind {
    /// The memory limit was exhausted.
    MemoryExhausted,
    /// The execution time limit was exceeded.
    TimeLimitExceeded,
    /// Anything else.
    Other,
}

impl FatalKind {
    /// Classify a fatal error message.
    pub fn classify(message: &str) -> Self {
        if message.contains("Allowed memory size of") {
            Self::MemoryExhausted
        } else if message.contains("Maximum execution time") {
            Self::TimeLimitExceeded
        } else {
            Self::Other
        }
    }
}

/// A classified fatal error, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalReport {
    pub kind: FatalKind,
    pub message: String,
    limits: ResourceLimits,
}

impl FatalReport {
    /// Classify `message` against the configured limits.
    pub fn new(message: impl Into<String>, limits: &ResourceLimits) -> Self {
        let message = message.into();
        Self {
            kind: FatalKind::classify(&message),
            message,
            limits: limits.clone(),
        }
    }

    /// The hint shown to the user. Never contains the raw error.
    pub fn user_message(&self) -> String {
        match self.kind {
            FatalKind::MemoryExhausted => format!(
                "iTop: Allowed memory size of {} exhausted, contact your administrator to increase 'memory_limit'",
                self.limits.memory_limit
            ),
            FatalKind::TimeLimitExceeded => format!(
                "iTop: Maximum execution time of {} exceeded, contact your administrator to increase 'max_execution_time'",
                self.limits.max_execution_time
            ),
            FatalKind::Other => {
                "iTop: An error occurred, check server error log for more information.".to_string()
            }
        }
    }
}

impl fmt::Display for FatalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_message())
    }
}

/// Install a panic hook that logs the panic and prints the user hint.
pub fn install_panic_guard(limits: ResourceLimits) {
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());

        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!("Fatal error at {}: {}", location, message);

        eprintln!("{}", FatalReport::new(message, &limits));
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ResourceLimits {
        ResourceLimits {
            memory_limit: "128M".to_string(),
            max_execution_time: "30".to_string(),
        }
    }

    #[test]
    fn classifies_memory_exhaustion() {
        let report = FatalReport::new(
            "Allowed memory size of 134217728 bytes exhausted (tried to allocate 20480 bytes)",
            &limits(),
        );
        assert_eq!(report.kind, FatalKind::MemoryExhausted);
        assert!(report.user_message().contains("128M"));
        assert!(report.user_message().contains("memory_limit"));
    }

    #[test]
    fn classifies_time_limit() {
        let report = FatalReport::new("Maximum execution time of 30 seconds exceeded", &limits());
        assert_eq!(report.kind, FatalKind::TimeLimitExceeded);
        assert!(report.user_message().contains("max_execution_time"));
    }

    #[test]
    fn other_errors_point_to_log() {
        let report = FatalReport::new("Call to undefined method", &limits());
        assert_eq!(report.kind, FatalKind::Other);
        assert!(report.user_message().contains("server error log"));
        assert!(!report.user_message().contains("undefined method"));
    }

    #[test]
    fn display_matches_user_message() {
        let report = FatalReport::new("boom", &limits());
        assert_eq!(report.to_string(), report.user_message());
    }
}
