//! Catalog Service Library
//!
//! Write layer of the storefront catalog: products, variants with their
//! images and tags, reviews, and synchronization of variants into the
//! hosted search index.
//!
//! # Layers
//!
//! - **infra**: database, migrations, unit of work, Redis view cache
//! - **repository**: SeaORM entities and queries
//! - **search**: search index adapters and the outbox relay
//! - **service**: write use cases and their `{success}`/`{error}` boundary
//! - **api**: axum routes, bearer identity, OpenAPI
//! - **jobs**: background relay worker

pub mod api;
pub mod config;
pub mod infra;
pub mod jobs;
pub mod repository;
pub mod search;
pub mod service;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use common::{AppResult, SearchConfig};
use domain::{Clock, SystemClock};

use crate::api::{create_router, AppState, TokenVerifier};
use crate::config::CatalogServiceConfig;
use crate::infra::{Database, RedisViewCache};
use crate::search::{AlgoliaIndex, LogOnlyIndex, SearchIndex, SearchSync};
use crate::service::{Collaborators, Services};

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Background job action type.
#[derive(Debug, Clone, Copy)]
pub enum JobsAction {
    /// Run the outbox relay until Ctrl+C
    Work,
    /// Print outbox queue depth
    Status,
    /// Remove delivered entries older than the given number of hours
    Purge { older_than_hours: i64 },
}

/// Run the HTTP server.
pub async fn run_server(config: CatalogServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.jwt.secret.is_empty() {
        warn!("JWT_SECRET is empty; every bearer token will be rejected");
    }

    let database = Arc::new(Database::connect(&config.database).await?);
    let views = Arc::new(
        RedisViewCache::connect(&config.cache.url, config.cache.default_ttl_seconds).await?,
    );
    let collaborators = Collaborators {
        index: search_index(&config.search)?,
        views: views.clone(),
        cache: views,
        clock: Arc::new(SystemClock),
    };

    let services = Services::from_connection(
        database.get_connection(),
        collaborators,
        config.outbox.clone(),
        config.placeholder_image_url.clone(),
    );
    let tokens = Arc::new(TokenVerifier::new(&config.jwt.secret));
    let state = AppState::from_container(&services, database, tokens);

    let app = create_router(
        state,
        Duration::from_secs(config.service.request_timeout_seconds),
    );

    let addr = config.service.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("{} listening on {}", config.service.service_name, addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(jobs::ctrl_c())
        .await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &CatalogServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Run a background job command.
pub async fn run_jobs(
    config: &CatalogServiceConfig,
    action: JobsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sync = SearchSync::new(
        infra::Persistence::new(db.get_connection()),
        search_index(&config.search)?,
        clock,
        config.outbox.clone(),
    );

    match action {
        JobsAction::Work => {
            let interval = Duration::from_millis(config.outbox.poll_interval_ms);
            jobs::run_relay(&sync, interval, jobs::ctrl_c()).await;
        }
        JobsAction::Status => {
            let counts = sync.counts().await?;
            println!("\n=== Search Outbox Status ===");
            println!("Pending:    {}", counts.pending);
            println!("Exhausted:  {}", counts.exhausted);
            println!("Delivered:  {}", counts.delivered);
            println!("============================\n");
        }
        JobsAction::Purge { older_than_hours } => {
            let before = Utc::now() - chrono::Duration::hours(older_than_hours);
            let removed = sync.purge_delivered(before).await?;
            println!("Purged {} delivered outbox entries.", removed);
        }
    }

    Ok(())
}

/// Algolia when credentials are configured, otherwise a logging stand-in.
pub fn search_index(config: &SearchConfig) -> AppResult<Arc<dyn SearchIndex>> {
    if config.is_configured() {
        info!(index = %config.index_name, "Using Algolia search index");
        Ok(Arc::new(AlgoliaIndex::new(config)?))
    } else {
        warn!("Search index not configured - index operations will only be logged");
        Ok(Arc::new(LogOnlyIndex))
    }
}
