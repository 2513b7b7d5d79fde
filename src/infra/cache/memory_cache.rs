use crate::domain::ports::CacheStore;
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-wide cache for derived notices. Entries live until overwritten
/// or deleted; nothing expires.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("missing").await.unwrap(), None);

        cache.set("RECENT_ANNOUNCEMENTS", "first").await.unwrap();
        cache.set("RECENT_ANNOUNCEMENTS", "second").await.unwrap();
        assert_eq!(cache.get("RECENT_ANNOUNCEMENTS").await.unwrap().as_deref(), Some("second"));

        cache.delete("RECENT_ANNOUNCEMENTS").await.unwrap();
        assert_eq!(cache.get("RECENT_ANNOUNCEMENTS").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = MemoryCache::new();
        let other = cache.clone();
        other.set("k", "v").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
