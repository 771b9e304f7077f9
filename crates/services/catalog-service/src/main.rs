//! Catalog Service - HTTP write layer for the storefront catalog.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_service_lib::{config::CatalogServiceConfig, JobsAction, MigrateAction};

#[derive(Parser)]
#[command(name = "catalog-service")]
#[command(about = "Catalog write service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long, env = "CATALOG_SERVICE_HOST")]
        host: Option<String>,
        #[arg(long, env = "CATALOG_SERVICE_PORT")]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Search outbox relay commands
    Jobs {
        #[command(subcommand)]
        action: JobsCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum JobsCommands {
    /// Start the outbox relay worker
    Work,
    /// Show outbox queue depth
    Status,
    /// Remove delivered outbox entries
    Purge {
        /// Only remove entries delivered more than this many hours ago
        #[arg(long, default_value_t = 168)]
        older_than_hours: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = CatalogServiceConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            catalog_service_lib::run_server(config).await?;
        }
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            catalog_service_lib::run_migrations(&config, migrate_action).await?;
        }
        Commands::Jobs { action } => {
            let jobs_action = match action {
                JobsCommands::Work => JobsAction::Work,
                JobsCommands::Status => JobsAction::Status,
                JobsCommands::Purge { older_than_hours } => JobsAction::Purge { older_than_hours },
            };
            catalog_service_lib::run_jobs(&config, jobs_action).await?;
        }
    }

    Ok(())
}
