use serde_json::{Map, Value};
use std::time::Duration;
use tokio::time::Instant;

/// Session payload. The store never looks inside it.
pub type Payload = Map<String, Value>;

/// Idle time after which a session becomes eligible for removal (30 minutes)
pub const DEFAULT_SESSION_EXPIRY: Duration = Duration::from_secs(30 * 60);

/// Maximum number of live sessions
pub const DEFAULT_MAX_SESSIONS: usize = 100;

/// Period of the background expiry sweep (1 minute)
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// One stored session
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub session_id: String,
    pub created_at: Instant,
    pub last_accessed: Instant,
    pub data: Payload,
}

impl SessionEntry {
    pub fn new(session_id: String, data: Payload) -> Self {
        let now = Instant::now();
        Self {
            session_id,
            created_at: now,
            last_accessed: now,
            data,
        }
    }

    /// Refreshes recency. `Instant` is monotonic so `last_accessed` never
    /// drops below `created_at`.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    /// Replaces the payload wholesale and refreshes recency.
    pub fn replace(&mut self, data: Payload) {
        self.data = data;
        self.touch();
    }

    /// Checks if the entry has been idle for longer than `expiry` at `now`
    ///
    /// Uses `>` so an entry idle for exactly `expiry` is kept.
    pub fn is_expired(&self, now: Instant, expiry: Duration) -> bool {
        now.saturating_duration_since(self.last_accessed) > expiry
    }

    pub fn info(&self) -> EntryInfo {
        EntryInfo {
            created_at: self.created_at,
            last_accessed: self.last_accessed,
        }
    }
}

/// Timestamps of a stored session, read without touching it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    pub created_at: Instant,
    pub last_accessed: Instant,
}

/// Configuration for the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum idle time before a session is swept.
    pub session_expiry: Duration,

    /// Maximum number of sessions held at once. Zero means nothing is retained.
    pub max_sessions: usize,

    /// How often the background sweep runs.
    pub sweep_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            session_expiry: DEFAULT_SESSION_EXPIRY,
            max_sessions: DEFAULT_MAX_SESSIONS,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_expiry(mut self, expiry: Duration) -> Self {
        self.session_expiry = expiry;
        self
    }

    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}
