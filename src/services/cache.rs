use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// In-process cache for values that are expensive to fetch
///
/// Values are stored as JSON so any serializable type can share one cache.
/// Entries expire after the configured TTL.
#[derive(Clone)]
pub struct CacheManager {
    entries: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    /// Get a value from cache
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        match self.entries.get(key).await {
            Some(bytes) => {
                tracing::trace!("Cache hit: {}", key);
                Ok(serde_json::from_slice(&bytes)?)
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Err(CacheError::CacheMiss(key.to_string()))
            }
        }
    }

    /// Set a value in cache
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_string(), bytes).await;
        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    pub async fn delete(&self, key: &str) {
        self.entries.invalidate(key).await;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a weather reading
    ///
    /// Both parts are JSON-encoded so separators inside a name cannot make
    /// two different lookups share a key.
    pub fn weather(city: Option<&str>, region: Option<&str>) -> String {
        format!("weather:{}", serde_json::json!([city, region]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_set_get() {
        let cache = CacheManager::new(100, 60);

        let key = "test_key";
        let value = "test_value".to_string();

        // Set and get
        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);
        assert_eq!(cache.stats().ttl_secs, 60);

        // Delete
        cache.delete(key).await;
        assert!(matches!(
            cache.get::<String>(key).await,
            Err(CacheError::CacheMiss(_))
        ));
    }

    #[tokio::test]
    async fn test_type_mismatch_is_serialization_error() {
        let cache = CacheManager::new(100, 60);
        cache.set("n", &42u32).await.unwrap();

        assert!(matches!(
            cache.get::<Vec<String>>("n").await,
            Err(CacheError::SerializationError(_))
        ));
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(
            CacheKey::weather(Some("Torna Peth"), None),
            r#"weather:["Torna Peth",null]"#
        );
        assert_eq!(
            CacheKey::weather(None, Some("Konkan Belt")),
            r#"weather:[null,"Konkan Belt"]"#
        );
    }

    #[test]
    fn test_weather_keys_do_not_collide_on_separators() {
        assert_ne!(
            CacheKey::weather(Some("a:b"), None),
            CacheKey::weather(Some("a"), Some("b"))
        );
    }
}
