use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::session::StoreConfig;
use crate::session::types::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_EXPIRY, DEFAULT_SWEEP_INTERVAL};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,

    /// Extra `tracing` filter directives, e.g. `deeplucid::session=debug`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether state management starts enabled
    pub enabled: bool,
    pub expiry_secs: u64,
    pub max_sessions: usize,
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            expiry_secs: DEFAULT_SESSION_EXPIRY.as_secs(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new()
            .with_session_expiry(Duration::from_secs(self.session.expiry_secs))
            .with_max_sessions(self.session.max_sessions)
            .with_sweep_interval(Duration::from_secs(self.session.sweep_interval_secs))
    }
}
