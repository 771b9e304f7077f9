//! Redis-backed view cache and path invalidation.
//!
//! Rendered read models are stored under `view:{path}`. Mutations call
//! [`ViewInvalidator::revalidate_path`], which bumps the path's generation,
//! drops the cached entry and publishes the path so other processes can drop
//! their own copies. Readers note the generation before loading and store
//! only if it is unchanged, so a snapshot taken before an invalidation is
//! never written back over it.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisError, RedisResult, Script};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Cache key prefix for rendered views
pub const CACHE_PREFIX_VIEW: &str = "view:";

/// Cache key prefix for per-path generation counters
pub const CACHE_PREFIX_GENERATION: &str = "view:gen:";

/// Pub/sub channel carrying invalidated paths
pub const CHANNEL_VIEW_INVALIDATE: &str = "view:invalidate";

/// Sets KEYS[1] to ARGV[2] with TTL ARGV[3] only while the generation in
/// KEYS[2] (missing counts as 0) equals ARGV[1].
const STORE_IF_GENERATION: &str = r#"
local current = redis.call('GET', KEYS[2]) or '0'
if current == ARGV[1] then
    redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
    return 1
end
return 0
"#;

/// Cache key for a view path.
pub fn view_key(path: &str) -> String {
    format!("{}{}", CACHE_PREFIX_VIEW, path)
}

/// Generation counter key for a view path.
pub fn generation_key(path: &str) -> String {
    format!("{}{}", CACHE_PREFIX_GENERATION, path)
}

/// Signals that the read model behind a path is stale.
///
/// Failures are logged and swallowed; a missed invalidation only delays
/// freshness until the entry expires.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ViewInvalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str);
}

/// Path-keyed storage of serialized read models.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Cached JSON for a path; errors and misses both yield `None`.
    async fn get_json(&self, path: &str) -> Option<String>;

    /// Current invalidation generation of a path; `None` when unknown.
    async fn generation(&self, path: &str) -> Option<u64>;

    /// Store JSON for a path with the default TTL, unless the path was
    /// invalidated since `generation` was read. Returns whether it was stored.
    async fn set_json_if(&self, path: &str, json: String, generation: u64) -> bool;
}

/// Typed read through a [`ViewCache`]. Undecodable entries count as misses.
pub async fn get_view<T: DeserializeOwned>(cache: &dyn ViewCache, path: &str) -> Option<T> {
    let json = cache.get_json(path).await?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path, error = %e, "Discarding undecodable cached view");
            None
        }
    }
}

/// Typed write through a [`ViewCache`], guarded by the generation read
/// before `value` was loaded.
pub async fn set_view<T: Serialize + Sync>(
    cache: &dyn ViewCache,
    path: &str,
    generation: u64,
    value: &T,
) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!(path, error = %e, "Failed to serialize view for caching");
            return;
        }
    };
    if !cache.set_json_if(path, json, generation).await {
        debug!(path, generation, "View invalidated while loading, not cached");
    }
}

/// Redis implementation of both cache traits.
#[derive(Clone)]
pub struct RedisViewCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
    store_if: Script,
}

impl RedisViewCache {
    /// Connect to Redis.
    pub async fn connect(url: &str, ttl_seconds: u64) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self {
            conn,
            ttl_seconds,
            store_if: Script::new(STORE_IF_GENERATION),
        })
    }
}

#[async_trait]
impl ViewInvalidator for RedisViewCache {
    async fn revalidate_path(&self, path: &str) {
        let mut conn = self.conn.clone();
        let key = view_key(path);

        if let Err(e) = conn.incr::<_, _, u64>(generation_key(path), 1).await {
            warn!(path, error = %e, "Failed to bump view generation");
        }
        if let Err(e) = conn.del::<_, ()>(&key).await {
            warn!("Redis delete error for key {}: {}", key, e);
        }
        match conn.publish::<_, _, i64>(CHANNEL_VIEW_INVALIDATE, path).await {
            Ok(receivers) => debug!(path, receivers, "View invalidated"),
            Err(e) => warn!(path, error = %e, "Failed to publish view invalidation"),
        }
    }
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn get_json(&self, path: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        let key = view_key(path);
        match conn.get::<_, Option<String>>(&key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Redis get error for key {}: {}", key, e);
                None
            }
        }
    }

    async fn generation(&self, path: &str) -> Option<u64> {
        let mut conn = self.conn.clone();
        match conn.get::<_, Option<u64>>(generation_key(path)).await {
            Ok(generation) => Some(generation.unwrap_or(0)),
            Err(e) => {
                warn!(path, error = %e, "Failed to read view generation");
                None
            }
        }
    }

    async fn set_json_if(&self, path: &str, json: String, generation: u64) -> bool {
        let mut conn = self.conn.clone();
        let key = view_key(path);
        let stored: RedisResult<i64> = self
            .store_if
            .key(&key)
            .key(generation_key(path))
            .arg(generation)
            .arg(json)
            .arg(self.ttl_seconds)
            .invoke_async(&mut conn)
            .await;
        match stored {
            Ok(stored) => stored == 1,
            Err(e) => {
                warn!("Redis set error for key {}: {}", key, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_key_prefixes_path() {
        assert_eq!(view_key("/dashboard/products"), "view:/dashboard/products");
        assert_eq!(
            generation_key("/dashboard/products"),
            "view:gen:/dashboard/products"
        );
    }

    #[tokio::test]
    async fn test_get_view_treats_garbage_as_miss() {
        let mut cache = MockViewCache::new();
        cache
            .expect_get_json()
            .returning(|_| Some("not json".to_string()));

        let value: Option<Vec<i32>> = get_view(&cache, "/x").await;
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_set_view_serializes_value_with_generation() {
        let mut cache = MockViewCache::new();
        cache
            .expect_set_json_if()
            .withf(|path, json, generation| path == "/x" && json == "[1,2]" && *generation == 4)
            .times(1)
            .returning(|_, _, _| true);

        set_view(&cache, "/x", 4, &vec![1, 2]).await;
    }
}
