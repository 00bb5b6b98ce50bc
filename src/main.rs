//! Notula - Minimal notes CRUD service with auto-generated API docs

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notula::api::{self, AppState};
use notula::config::Config;
use notula::store::NoteStore;

#[derive(Parser)]
#[command(name = "notula")]
#[command(about = "Minimal notes CRUD service with auto-generated API docs")]
#[command(version)]
struct Cli {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Database file path (overrides NOTULA_DB)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("notula={},tower_http=debug", log_level).into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    let _ = dotenvy::dotenv();

    let mut config = Config::from_env()?;
    if let Some(port) = cli.port {
        config.http_port = port;
    }
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    // Open the store once at startup; handlers receive it through state
    let store = Arc::new(NoteStore::open(&config.db_path)?);
    tracing::info!("Opened note store at {:?}", config.db_path);

    let router = api::create_router(AppState { store });

    let listener =
        tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port)).await?;
    tracing::info!("Starting HTTP server on port {}", config.http_port);

    println!("Notula server running at http://localhost:{}", config.http_port);
    println!("  API:      http://localhost:{}/notes", config.http_port);
    println!("  API Docs: http://localhost:{}/api-docs", config.http_port);
    println!("  Health:   http://localhost:{}/health", config.http_port);

    axum::serve(listener, router).await?;

    Ok(())
}
