//! Per-execution call context.
//!
//! The context is the only state a function may consult besides its
//! arguments. Hosts build one per evaluation and pass it to every call;
//! cloning is cheap, the override table is shared.

use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Explicit per-execution state threaded through every call.
#[derive(Clone, Debug)]
pub struct CallContext {
    env_overrides: Arc<FxHashMap<String, String>>,
    process_env: bool,
}

impl Default for CallContext {
    fn default() -> Self {
        CallContext {
            env_overrides: Arc::default(),
            process_env: true,
        }
    }
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the environment override table.
    #[must_use]
    pub fn with_env_overrides<K, V>(mut self, overrides: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_overrides = Arc::new(
            overrides
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Add or replace a single override.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.env_overrides).insert(key.into(), value.into());
        self
    }

    /// Never fall back to the process environment.
    #[must_use]
    pub fn without_process_env(mut self) -> Self {
        self.process_env = false;
        self
    }

    /// Look up an environment variable: overrides first, then the process
    /// environment (unless disabled).
    pub fn env_var(&self, key: &str) -> Option<String> {
        if let Some(value) = self.env_overrides.get(key) {
            return Some(value.clone());
        }
        if self.process_env {
            std::env::var(key).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
