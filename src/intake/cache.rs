use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Encoded previews keyed by the SHA-256 of the bytes they were made from.
#[derive(Clone)]
pub struct PreviewCache {
    cache: Arc<Mutex<LruCache<String, String>>>,
}

impl PreviewCache {
    pub fn new(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity)))
        }
    }

    pub fn digest(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    pub async fn get(&self, digest: &str) -> Option<String> {
        let mut cache = self.cache.lock().await;
        cache.get(digest).cloned()
    }

    pub async fn put(&self, digest: String, data_uri: String) {
        let mut cache = self.cache.lock().await;
        cache.put(digest, data_uri);
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
