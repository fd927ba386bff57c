//! Bounded, expiring in-memory session store
//!
//! Sessions live in an LRU list guarded by a single lock, together with the
//! store-wide `enabled` flag. Capacity is enforced on insert, and idle sessions
//! are removed by a periodic sweep (see [`crate::session::sweep`]).

use crate::session::types::{EntryInfo, Payload, SessionEntry, StoreConfig};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, trace};

/// State protected by the store lock.
pub(crate) struct StoreInner {
    pub(crate) enabled: bool,
    /// Most recently accessed first; the tail is the eviction candidate.
    pub(crate) sessions: LruCache<String, SessionEntry>,
}

/// Session store shared by every tool handler.
///
/// Cloning is cheap and every clone refers to the same sessions.
#[derive(Clone)]
pub struct SessionStore {
    pub(crate) inner: Arc<RwLock<StoreInner>>,
    config: StoreConfig,
}

impl SessionStore {
    pub fn new(enabled: bool, config: StoreConfig) -> Self {
        // A zero capacity store never inserts, so the LRU bound only needs to be non-zero.
        let cap = NonZeroUsize::new(config.max_sessions).unwrap_or(NonZeroUsize::MIN);

        info!(
            enabled = enabled,
            max_sessions = config.max_sessions,
            session_expiry_secs = config.session_expiry.as_secs(),
            "Session store created"
        );

        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                enabled,
                sessions: LruCache::new(cap),
            })),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn is_enabled(&self) -> bool {
        self.inner.read().await.enabled
    }

    /// Turns state management on or off.
    ///
    /// Disabling drops every session under the same lock that flips the flag.
    pub async fn set_enabled(&self, enabled: bool) {
        let mut guard = self.inner.write().await;
        let was_enabled = guard.enabled;
        guard.enabled = enabled;

        if !enabled {
            let dropped = guard.sessions.len();
            guard.sessions.clear();
            if was_enabled || dropped > 0 {
                info!(dropped_sessions = dropped, "Session store disabled");
            }
        } else if !was_enabled {
            info!("Session store enabled");
        }
    }

    /// Returns the session payload and marks it as recently used.
    ///
    /// Always `None` while the store is disabled.
    pub async fn get(&self, session_id: &str) -> Option<Payload> {
        let mut guard = self.inner.write().await;
        if !guard.enabled {
            return None;
        }

        let entry = guard.sessions.get_mut(session_id)?;
        entry.touch();
        trace!(session_id = %session_id, "Session read");
        Some(entry.data.clone())
    }

    /// Stores a payload, replacing any previous one for the same session.
    ///
    /// Dropped silently while disabled. Inserting a new session into a full
    /// store first evicts the least recently accessed one.
    pub async fn set(&self, session_id: &str, data: Payload) {
        let mut guard = self.inner.write().await;
        if !guard.enabled {
            trace!(session_id = %session_id, "Store disabled, write dropped");
            return;
        }

        if let Some(entry) = guard.sessions.get_mut(session_id) {
            entry.replace(data);
            trace!(session_id = %session_id, "Session updated");
            return;
        }

        if self.config.max_sessions == 0 {
            debug!(session_id = %session_id, "Store capacity is zero, session not retained");
            return;
        }

        if guard.sessions.len() >= self.config.max_sessions {
            if let Some((evicted_id, _)) = guard.sessions.pop_lru() {
                debug!(
                    session_id = %evicted_id,
                    max_sessions = self.config.max_sessions,
                    "Evicting least recently used session to make room"
                );
            }
        }

        let entry = SessionEntry::new(session_id.to_string(), data);
        guard.sessions.put(session_id.to_string(), entry);

        debug!(
            session_id = %session_id,
            session_count = guard.sessions.len(),
            "Session created"
        );
    }

    /// Removes one session, returning whether it was present.
    ///
    /// Honored even while disabled.
    pub async fn clear(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        let removed = guard.sessions.pop(session_id).is_some();
        if removed {
            debug!(session_id = %session_id, "Session cleared");
        }
        removed
    }

    pub async fn clear_all(&self) {
        let mut guard = self.inner.write().await;
        let count = guard.sessions.len();
        guard.sessions.clear();
        info!(cleared = count, "All sessions cleared");
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    /// Existence check. Does not refresh recency and ignores the enabled flag.
    pub async fn has(&self, session_id: &str) -> bool {
        self.inner.read().await.sessions.contains(session_id)
    }

    /// Timestamps of a session without refreshing recency.
    pub async fn entry_info(&self, session_id: &str) -> Option<EntryInfo> {
        self.inner
            .read()
            .await
            .sessions
            .peek(session_id)
            .map(SessionEntry::info)
    }

    /// Live session ids, sorted.
    pub async fn session_ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        let mut ids: Vec<String> = guard.sessions.iter().map(|(id, _)| id.clone()).collect();
        ids.sort();
        ids
    }

    /// Removes every session idle for longer than the configured expiry.
    ///
    /// No-op while disabled. Recency is checked under the write lock, so a
    /// session refreshed by a concurrent `get` is never removed by this pass.
    pub(crate) async fn sweep_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        if !guard.enabled {
            return 0;
        }

        let now = Instant::now();
        let expiry = self.config.session_expiry;
        let expired: Vec<String> = guard
            .sessions
            .iter()
            .filter(|(_, entry)| entry.is_expired(now, expiry))
            .map(|(id, _)| id.clone())
            .collect();

        for session_id in &expired {
            guard.sessions.pop(session_id);
            debug!(session_id = %session_id, "Removed expired session");
        }

        expired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn payload(key: &str, value: i64) -> Payload {
        let mut data = Payload::new();
        data.insert(key.to_string(), json!(value));
        data
    }

    fn store_with_capacity(max: usize) -> SessionStore {
        SessionStore::new(true, StoreConfig::new().with_max_sessions(max))
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = store_with_capacity(10);
        store.set("s1", payload("value", 1)).await;

        let data = store.get("s1").await.unwrap();
        assert_eq!(data["value"], json!(1));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = store_with_capacity(10);
        assert!(store.get("missing").await.is_none());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_disabled_store_drops_writes() {
        let store = SessionStore::new(false, StoreConfig::default());
        store.set("x", payload("value", 1)).await;

        assert!(store.get("x").await.is_none());
        assert_eq!(store.count().await, 0);
        assert!(!store.has("x").await);
    }

    #[tokio::test]
    async fn test_disable_clears_sessions() {
        let store = store_with_capacity(10);
        store.set("a", payload("v", 1)).await;
        store.set("b", payload("v", 2)).await;

        store.set_enabled(false).await;
        assert_eq!(store.count().await, 0);
        assert!(!store.is_enabled().await);

        store.set_enabled(true).await;
        assert_eq!(store.count().await, 0);
        assert!(store.is_enabled().await);
    }

    #[tokio::test]
    async fn test_set_enabled_idempotent() {
        let store = store_with_capacity(10);
        store.set("a", payload("v", 1)).await;

        store.set_enabled(true).await;
        assert_eq!(store.count().await, 1);

        store.set_enabled(false).await;
        store.set_enabled(false).await;
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_payload() {
        let store = store_with_capacity(10);
        store.set("k", payload("a", 1)).await;
        store.set("k", payload("b", 2)).await;

        let data = store.get("k").await.unwrap();
        assert!(data.get("a").is_none());
        assert_eq!(data["b"], json!(2));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_eviction_picks_least_recently_accessed() {
        let store = store_with_capacity(2);
        store.set("a", payload("v", 1)).await;
        store.set("b", payload("v", 2)).await;
        store.get("a").await;
        store.set("c", payload("v", 3)).await;

        assert!(!store.has("b").await);
        assert!(store.has("a").await);
        assert!(store.has("c").await);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_has_does_not_refresh_recency() {
        let store = store_with_capacity(2);
        store.set("a", payload("v", 1)).await;
        store.set("b", payload("v", 2)).await;
        assert!(store.has("a").await);
        store.set("c", payload("v", 3)).await;

        assert!(!store.has("a").await);
        assert!(store.has("b").await);
    }

    #[tokio::test]
    async fn test_updating_existing_key_at_capacity_does_not_evict() {
        let store = store_with_capacity(2);
        store.set("a", payload("v", 1)).await;
        store.set("b", payload("v", 2)).await;
        store.set("a", payload("v", 3)).await;

        assert_eq!(store.count().await, 2);
        assert!(store.has("a").await);
        assert!(store.has("b").await);
    }

    #[tokio::test]
    async fn test_zero_capacity_retains_nothing() {
        let store = store_with_capacity(0);
        store.set("a", payload("v", 1)).await;
        store.set("b", payload("v", 2)).await;

        assert_eq!(store.count().await, 0);
        assert!(store.get("a").await.is_none());
    }

    #[tokio::test]
    async fn test_clear_returns_presence() {
        let store = store_with_capacity(10);
        store.set("k", payload("v", 1)).await;

        assert!(store.clear("k").await);
        assert!(!store.clear("k").await);
        assert!(!store.clear("never-existed").await);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let store = store_with_capacity(10);
        for i in 0..5 {
            store.set(&format!("s{}", i), payload("v", i)).await;
        }
        store.clear_all().await;
        assert_eq!(store.count().await, 0);
        assert!(store.is_enabled().await);
    }

    #[tokio::test]
    async fn test_empty_payload_is_stored() {
        let store = store_with_capacity(10);
        store.set("empty", Payload::new()).await;

        let data = store.get("empty").await.unwrap();
        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_session_ids_sorted() {
        let store = store_with_capacity(10);
        store.set("charlie", Payload::new()).await;
        store.set("alpha", Payload::new()).await;
        store.set("bravo", Payload::new()).await;

        assert_eq!(store.session_ids().await, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_refreshes_last_accessed() {
        let store = store_with_capacity(10);
        store.set("k", Payload::new()).await;
        let before = store.entry_info("k").await.unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;
        store.get("k").await;
        let after = store.entry_info("k").await.unwrap();

        assert_eq!(after.created_at, before.created_at);
        assert!(after.last_accessed > before.last_accessed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_info_does_not_refresh() {
        let store = store_with_capacity(10);
        store.set("k", Payload::new()).await;
        let first = store.entry_info("k").await.unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;
        let second = store.entry_info("k").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_only_idle_sessions() {
        let store = SessionStore::new(
            true,
            StoreConfig::new().with_session_expiry(Duration::from_millis(1000)),
        );
        store.set("old", Payload::new()).await;
        tokio::time::advance(Duration::from_millis(800)).await;
        store.set("fresh", Payload::new()).await;
        tokio::time::advance(Duration::from_millis(700)).await;

        let removed = store.sweep_expired().await;

        assert_eq!(removed, 1);
        assert!(!store.has("old").await);
        assert!(store.has("fresh").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_recently_read_sessions() {
        let store = SessionStore::new(
            true,
            StoreConfig::new().with_session_expiry(Duration::from_millis(1000)),
        );
        store.set("k", Payload::new()).await;
        tokio::time::advance(Duration::from_millis(900)).await;
        store.get("k").await;
        tokio::time::advance(Duration::from_millis(900)).await;

        assert_eq!(store.sweep_expired().await, 0);
        assert!(store.has("k").await);
    }

    #[tokio::test]
    async fn test_sweep_is_noop_when_disabled() {
        let store = SessionStore::new(false, StoreConfig::default());
        assert_eq!(store.sweep_expired().await, 0);
    }

    #[tokio::test]
    async fn test_clones_share_sessions() {
        let store = store_with_capacity(10);
        let other = store.clone();
        store.set("shared", payload("v", 1)).await;

        assert!(other.has("shared").await);
        other.set_enabled(false).await;
        assert!(!store.is_enabled().await);
    }
}
