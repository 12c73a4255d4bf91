//! Runtime configuration with documented constants
//!
//! The tunable values are collected here with explanations of their purpose.
//! Defaults reproduce the behavior of the chat pipeline as shipped; a TOML
//! file can override individual fields.

use crate::core::error::{ErrandError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration for the chat pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrandConfig {
    /// Confidence gate for dispatching a classified intent
    ///
    /// A task operation runs only when the classifier reports strictly
    /// more than this value. At the default (0.6), intents that resolved
    /// an explicit task id (0.8-0.95) pass, while the degraded
    /// missing-parameter confidences (0.5-0.6) fail and the canned
    /// clarifying question is returned instead.
    pub confidence_threshold: f32,

    /// Upper bound on any single store operation, in milliseconds
    ///
    /// A store call that exceeds this is reported as an error outcome
    /// rather than hanging the dispatch path.
    pub store_timeout_ms: u64,

    /// Number of recent tasks summarized for the fallback reply generator
    ///
    /// Only consulted when a low-confidence message is handed to the LLM;
    /// the summary is best-effort context, never authoritative state.
    pub context_tasks: usize,
}

impl Default for ErrandConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            store_timeout_ms: 5000,
            context_tasks: 3,
        }
    }
}

impl ErrandConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// any field the file omits.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| ErrandError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
