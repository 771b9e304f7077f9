//! Catalog service configuration.

use std::env;
use std::str::FromStr;

use common::{CacheConfig, DatabaseConfig, JwtConfig, OutboxConfig, SearchConfig, ServiceConfig};

/// Default dashboard image for products without variant images.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/publicio_logo.jpg";

/// Catalog service configuration.
///
/// Secrets are redacted by the `Debug` impls of the nested sections.
#[derive(Debug, Clone)]
pub struct CatalogServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub jwt: JwtConfig,
    pub search: SearchConfig,
    pub outbox: OutboxConfig,
    /// Dashboard image used when a product has no variant image
    pub placeholder_image_url: String,
}

impl CatalogServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("CATALOG_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: parse_env("CATALOG_SERVICE_PORT", defaults.service.port),
                request_timeout_seconds: parse_env(
                    "REQUEST_TIMEOUT_SECONDS",
                    defaults.service.request_timeout_seconds,
                ),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_env(
                    "DATABASE_MAX_CONNECTIONS",
                    defaults.database.max_connections,
                ),
                min_connections: defaults.database.min_connections,
            },
            cache: CacheConfig {
                url: env::var("REDIS_URL").unwrap_or(defaults.cache.url),
                default_ttl_seconds: parse_env(
                    "VIEW_CACHE_TTL_SECONDS",
                    defaults.cache.default_ttl_seconds,
                ),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or_default(),
            },
            search: SearchConfig {
                app_id: non_empty_env("ALGOLIA_APP_ID"),
                admin_key: non_empty_env("ALGOLIA_ADMIN_KEY"),
                index_name: env::var("ALGOLIA_INDEX").unwrap_or(defaults.search.index_name),
                timeout_ms: parse_env("SEARCH_TIMEOUT_MS", defaults.search.timeout_ms),
            },
            outbox: OutboxConfig {
                batch_size: parse_env("OUTBOX_BATCH_SIZE", defaults.outbox.batch_size),
                max_attempts: parse_env("OUTBOX_MAX_ATTEMPTS", defaults.outbox.max_attempts),
                poll_interval_ms: parse_env(
                    "OUTBOX_POLL_INTERVAL_MS",
                    defaults.outbox.poll_interval_ms,
                ),
                lease_seconds: parse_env("OUTBOX_LEASE_SECONDS", defaults.outbox.lease_seconds),
            },
            placeholder_image_url: env::var("PLACEHOLDER_IMAGE_URL")
                .unwrap_or(defaults.placeholder_image_url),
        }
    }
}

impl Default for CatalogServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            jwt: JwtConfig::default(),
            search: SearchConfig::default(),
            outbox: OutboxConfig::default(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
