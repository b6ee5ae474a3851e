//! takeoff-ui - Drawing takeoff web service
//!
//! Accepts structural drawing uploads, sends them to an external multimodal
//! model for quantity extraction, and serves the resulting sheet for review
//! and editing.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use takeoff_common::config::{self, TomlConfig};
use takeoff_ui::services::gemini::GeminiClient;
use takeoff_ui::{build_router, AppState};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "takeoff-ui", version)]
struct Args {
    /// Root folder holding takeoff.db (falls back to TAKEOFF_ROOT_FOLDER,
    /// then the TOML config, then the platform data directory)
    #[arg(long)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification IMMEDIATELY after tracing init
    info!(
        "Starting Takeoff (takeoff-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let toml_config = TomlConfig::load()?;

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let db_path = config::prepare_root_folder(&root_folder)
        .with_context(|| format!("Failed to initialize root folder {}", root_folder.display()))?;
    info!("Database path: {}", db_path.display());

    let pool = takeoff_ui::db::init_database_pool(&db_path).await?;
    info!("✓ Connected to database");

    // Fail fast when no model API key is configured
    let api_key = config::resolve_api_key(&toml_config)?;
    let gemini = GeminiClient::new(api_key)?;

    // Create application state and router
    let state = AppState::new(pool, gemini);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:5731").await?;
    info!("takeoff-ui listening on http://127.0.0.1:5731");
    info!("Health check: http://127.0.0.1:5731/health");

    axum::serve(listener, app).await?;

    Ok(())
}
