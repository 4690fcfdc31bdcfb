//! licops-scout - Asset Scout service
//!
//! Checks vendor proposals for redundancy against the licensed-asset
//! catalog and runs source compliance verification (trust, license,
//! sanctions, PII redaction).

use anyhow::Result;
use clap::Parser;
use licops_common::config::TomlConfig;
use licops_scout::catalog;
use licops_scout::matcher::KeywordOverlapScorer;
use licops_scout::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "licops-scout")]
#[command(about = "Asset redundancy and compliance scout for LicOps")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5732", env = "LICOPS_SCOUT_PORT")]
    port: u16,

    /// TOML config file (default: platform config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Knowledge catalog seed file (JSON); default: compiled catalog
    #[arg(long, env = "LICOPS_CATALOG_PATH")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!(
        "Starting licops-scout (Asset Scout) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let toml_config = match &args.config {
        Some(path) => TomlConfig::load_from(path)?,
        None => TomlConfig::load()?,
    };

    // CLI/env beats TOML; no seed file at all means the compiled catalog
    let catalog = match args.catalog.or(toml_config.catalog_path) {
        Some(path) => catalog::load_from_json(&path)?,
        None => {
            info!("Using compiled knowledge catalog");
            catalog::default_catalog()
        }
    };
    info!(assets = catalog.len(), "Knowledge catalog ready");

    let state = AppState::new(catalog, Arc::new(KeywordOverlapScorer));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("licops-scout listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
