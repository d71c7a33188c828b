//! Interpreter configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of transitions kept in a flow's history.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for a running flow.
///
/// Every field has a default, so a partial JSON document is accepted.
///
/// # Example
///
/// ```rust
/// use flowkit::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{"history_limit": 10}"#).unwrap();
/// assert_eq!(config.history_limit, Some(10));
/// assert!(!config.log_ignored_events);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum transitions kept in history, `None` for unbounded
    pub history_limit: Option<usize>,

    /// Log ignored events at `debug` instead of `trace`
    pub log_ignored_events: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            log_ignored_events: false,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
