//! Support intake API server binary.
//!
//! Reads configuration from flags, the environment and an optional `.env`
//! file, migrates the database, then serves the REST API and the frontend.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use support_core::enrichment::Enricher;
use support_core::enrichment::gemini::{GeminiClient, GeminiConfig};
use support_core::store::{PgStore, SupportStore};
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "support_api_server", about = "Support intake API server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Interface to bind.
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    host: String,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/support_intake"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Built frontend to serve for non-API paths. Ignored when missing.
    #[arg(long, env = "PUBLIC_DIR", default_value = "./public")]
    public_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,support_api=debug,support_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    info!(port = args.port, host = %args.host, "starting support_api_server");
    info!(
        max_connections = args.max_connections,
        "configuring connection pool"
    );

    // Fails fast when JWT_SECRET is unset or blank.
    let jwt_secret = support_api::services::auth::jwt_secret_from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    info!("running database migrations");
    support_api::migrate(&pool).await?;

    // Fails fast when GEMINI_API_KEY is unset.
    let gemini = GeminiClient::new(GeminiConfig::from_env()?)?;
    info!(model = gemini.model(), "AI client ready");
    let enricher: Arc<dyn Enricher> = Arc::new(gemini);

    let public_dir = if args.public_dir.is_dir() {
        info!(dir = %args.public_dir.display(), "serving frontend");
        Some(args.public_dir)
    } else {
        warn!(dir = %args.public_dir.display(), "public dir not found, frontend disabled");
        None
    };

    let config = support_api::config::ApiConfig {
        bind_addr: format!("{}:{}", args.host, args.port),
        jwt_secret,
        public_dir,
    };

    let store: Arc<dyn SupportStore> = Arc::new(PgStore::new(pool));
    let state = support_api::AppState {
        store,
        enricher,
        config: config.clone(),
    };

    let app = support_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr: SocketAddr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
