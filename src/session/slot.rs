//! Key-value access to session state.

use std::collections::BTreeMap;

/// Read/write access to the values stored in a session.
///
/// The resolver receives this explicitly instead of reaching for ambient
/// session state, so any backend (file store, memory, a web framework's
/// session) can sit behind it.
pub trait SessionSlot {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory session values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySession {
    values: BTreeMap<String, String>,
}

impl MemorySession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session pre-populated with one value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut session = Self::new();
        session.set(key, value);
        session
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionSlot for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
