//! Tournament leaderboard HTTP server.
//!
//! Serves the player API on top of a PostgreSQL or in-memory player store.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use lb_server::{
    api,
    config::{ServerConfig, StoreBackend},
    logging, metrics,
};
use leaderboard::{
    db::{Database, InMemoryPlayerStore, PgPlayerStore, PlayerStore},
    player::{LogReporter, TournamentService},
};
use pico_args::Arguments;
use tracing::{error, info, warn};

const HELP: &str = "\
Run the tournament leaderboard server

USAGE:
  lb_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]
  --db-url     URL         Database connection string  [default: env DATABASE_URL]
  --store      BACKEND     Player store: postgres | memory  [default: env STORE_BACKEND or postgres]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  DATABASE_URL             PostgreSQL connection string
  ADMIN_LOGIN              Basic auth login for /players
  ADMIN_PASSWORD           Basic auth password for /players (min 8 chars)
  METRICS_BIND             Prometheus exporter address (optional)
  STATIC_DIR               Directory served under /static [default: static]
  (See .env file for all configuration options)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let database_url: Option<String> = pargs.opt_value_from_str("--db-url")?;
    let store: Option<StoreBackend> = pargs.opt_value_from_str("--store")?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}\n\n{HELP}");
    }

    logging::init();

    let config = ServerConfig::from_env(bind, database_url, store)?;
    config.validate()?;

    if let Some(metrics_bind) = config.metrics_bind {
        match metrics::init_metrics(metrics_bind) {
            Ok(()) => info!("Prometheus metrics exposed on http://{}/metrics", metrics_bind),
            Err(e) => warn!("Metrics disabled: {}", e),
        }
    }

    let (player_store, database): (Arc<dyn PlayerStore>, Option<Database>) = match config.store {
        StoreBackend::Postgres => {
            info!("Connecting to database");
            let db = Database::new(&config.database)
                .await
                .context("Failed to connect to database")?;
            db.migrate().await.context("Failed to migrate database")?;
            info!("Database connected successfully");

            let store =
                PgPlayerStore::with_query_timeout(db.pool().clone(), config.database.query_timeout());
            (Arc::new(store), Some(db))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory player store; players are lost on shutdown");
            (Arc::new(InMemoryPlayerStore::new()), None)
        }
    };

    let api_state = api::AppState {
        service: TournamentService::new(player_store, Arc::new(LogReporter)),
        security: Arc::new(config.security.clone()),
        static_dir: config.static_dir.clone(),
    };

    let app = api::create_router(api_state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down server...");

    if let Some(db) = database {
        db.close().await;
    }

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }
}
