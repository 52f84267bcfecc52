//! Session identifiers and namespaces.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A unique session identifier.
///
/// Format: `sess_{timestamp_ms}_{random_hex}`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId {
    timestamp: DateTime<Utc>,
    random: [u8; 8],
}

impl SessionId {
    /// Generate a new session ID.
    pub fn generate() -> anyhow::Result<Self> {
        let mut random = [0u8; 8];
        getrandom::getrandom(&mut random).context("Failed to generate random bytes")?;

        // Truncate to milliseconds for consistent serialization
        let now = Utc::now();
        let timestamp = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        Ok(Self { timestamp, random })
    }

    /// Parse a session ID from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.strip_prefix("sess_")?;
        let (ts, random_hex) = s.split_once('_')?;

        let ts_millis: i64 = ts.parse().ok()?;
        let timestamp = DateTime::from_timestamp_millis(ts_millis)?;
        let random_bytes = hex::decode(random_hex).ok()?;
        let random: [u8; 8] = random_bytes.try_into().ok()?;

        Some(Self { timestamp, random })
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sess_{}_{}",
            self.timestamp.timestamp_millis(),
            hex::encode(self.random)
        )
    }
}

// Custom serialization to store as string
impl Serialize for SessionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SessionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SessionId::parse(&s).ok_or_else(|| serde::de::Error::custom("Invalid session ID format"))
    }
}

/// Session namespace derived from the application root.
///
/// Two deployments living on the same host get different names, so a
/// browser holding sessions for both never mixes their state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionName(String);

impl SessionName {
    /// Derive the namespace for an application root path.
    pub fn for_app_root(app_root: &Path) -> Self {
        let hash = Sha256::digest(app_root.to_string_lossy().as_bytes());
        Self(format!("itop-{}", hex::encode(&hash[..16])))
    }

    /// The namespace as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_generation() {
        let id1 = SessionId::generate().unwrap();
        let id2 = SessionId::generate().unwrap();

        assert_ne!(id1, id2);
        assert!(id1.to_string().starts_with("sess_"));
    }

    #[test]
    fn session_id_from_string() {
        let id = SessionId::generate().unwrap();
        let parsed = SessionId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_display_format() {
        let id = SessionId::generate().unwrap();
        let display = id.to_string();

        let (ts, random) = display
            .strip_prefix("sess_")
            .unwrap()
            .split_once('_')
            .unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert_eq!(random.len(), 16);
    }

    #[test]
    fn session_id_serialization() {
        let id = SessionId::generate().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_parse_invalid() {
        assert!(SessionId::parse("invalid").is_none());
        assert!(SessionId::parse("sess_").is_none());
        assert!(SessionId::parse("sess_123").is_none());
        assert!(SessionId::parse("sess_abc_xyz").is_none());
        assert!(SessionId::parse("sess_123_abcd").is_none());
    }

    #[test]
    fn session_name_is_stable_per_root() {
        let a = SessionName::for_app_root(Path::new("/var/www/itop/"));
        let b = SessionName::for_app_root(Path::new("/var/www/itop/"));
        assert_eq!(a, b);
        assert!(a.as_str().starts_with("itop-"));
        assert_eq!(a.as_str().len(), "itop-".len() + 32);
    }

    #[test]
    fn session_name_differs_between_roots() {
        let a = SessionName::for_app_root(Path::new("/var/www/itop"));
        let b = SessionName::for_app_root(Path::new("/var/www/itop-test"));
        assert_ne!(a, b);
    }
}
