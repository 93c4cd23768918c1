//! Environment variable sources.
//!
//! Configuration loading goes through the [`EnvSource`] trait instead of
//! touching `std::env` directly, so tests and embedders can supply an
//! in-memory map without mutating the real process environment.

use std::collections::HashMap;

/// Read-only view over environment-style key/value pairs.
pub trait EnvSource {
    /// Look up a variable. Returns `None` when the key is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory source for deterministic tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, returning `self` for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Remove a variable, returning `self` for chaining.
    pub fn unset(mut self, key: &str) -> Self {
        self.vars.remove(key);
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
