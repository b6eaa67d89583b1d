//! Query cache for pictogram searches
//!
//! Entries live until the process exits or the language changes. Each clear
//! starts a new epoch; writers must present the epoch they observed before
//! their request so a response fetched for the previous language cannot
//! repopulate the cache after the switch.

use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::PictogramRecord;

/// Cache key for free-text queries: trimmed and lowercased
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Default)]
struct CacheState {
    epoch: u64,
    entries: HashMap<String, Vec<PictogramRecord>>,
}

/// Normalized query -> truncated search results
#[derive(Debug, Default)]
pub struct SearchCache {
    state: RwLock<CacheState>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<PictogramRecord>> {
        self.state.read().await.entries.get(key).cloned()
    }

    /// Epoch to hand back to [`SearchCache::insert`] once a fetch completes
    pub async fn epoch(&self) -> u64 {
        self.state.read().await.epoch
    }

    /// Store results for `key`, last writer wins.
    ///
    /// Returns `false` (and stores nothing) when the cache was cleared since
    /// `epoch` was read.
    pub async fn insert(&self, epoch: u64, key: String, records: Vec<PictogramRecord>) -> bool {
        let mut state = self.state.write().await;
        if state.epoch != epoch {
            debug!(
                "Dropping cache write for '{}' from epoch {} (current {})",
                key, epoch, state.epoch
            );
            return false;
        }
        state.entries.insert(key, records);
        true
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
        state.epoch += 1;
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PictogramId;

    fn record(id: u64) -> PictogramRecord {
        PictogramRecord {
            id: PictogramId(id),
            keywords: vec![format!("word{id}")],
            image_url: format!("https://img/{id}"),
            description: String::new(),
            is_schematic: false,
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Hola Mundo \n"), "hola mundo");
        assert_eq!(normalize_query("ÑANDÚ"), "ñandú");
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let cache = SearchCache::new();
        let epoch = cache.epoch().await;

        assert!(cache.insert(epoch, "hola".into(), vec![record(1)]).await);
        assert_eq!(cache.get("hola").await, Some(vec![record(1)]));
        assert_eq!(cache.get("adios").await, None);
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let cache = SearchCache::new();
        let epoch = cache.epoch().await;

        cache.insert(epoch, "casa".into(), vec![record(1)]).await;
        cache.insert(epoch, "casa".into(), vec![record(2), record(3)]).await;

        assert_eq!(cache.get("casa").await, Some(vec![record(2), record(3)]));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_rejects_stale_writes() {
        let cache = SearchCache::new();
        let stale = cache.epoch().await;
        cache.insert(stale, "agua".into(), vec![record(5)]).await;

        cache.clear().await;
        assert!(cache.is_empty().await);

        assert!(!cache.insert(stale, "agua".into(), vec![record(5)]).await);
        assert!(cache.get("agua").await.is_none());

        let fresh = cache.epoch().await;
        assert!(cache.insert(fresh, "agua".into(), vec![record(6)]).await);
    }
}
