//! licops-intake - Data Licensing Intake service
//!
//! Accepts inbound licensing inquiries, extracts structured intake records
//! (model-backed or rule-based), stores them per session, and benchmarks
//! proposed prices against historical deal data.

use anyhow::Result;
use clap::Parser;
use licops_common::config::TomlConfig;
use licops_intake::extractors::{Extractor, HttpChatTransport, ModelExtractor};
use licops_intake::pricing::DealBook;
use licops_intake::{build_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "licops-intake")]
#[command(about = "Data licensing intake service for LicOps")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5731", env = "LICOPS_INTAKE_PORT")]
    port: u16,

    /// TOML config file (default: platform config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API key for the model-backed extraction endpoint
    #[arg(long, env = "LICOPS_MODEL_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the chat-completion endpoint
    #[arg(long)]
    model_url: Option<String>,

    /// Path to the historical deals CSV
    #[arg(long)]
    deals: Option<PathBuf>,
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
        "Starting licops-intake (Data Licensing Intake) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let toml_config = match &args.config {
        Some(path) => TomlConfig::load_from(path)?,
        None => TomlConfig::load()?,
    };

    // Model-backed extraction is optional: no key means fallback-only mode
    let model_extractor: Option<Arc<dyn Extractor>> = match licops_intake::config::resolve_model_settings(
        args.api_key.as_deref(),
        args.model_url.as_deref(),
        &toml_config,
    ) {
        Some(settings) => {
            info!(base_url = %settings.base_url, model = %settings.model, "Model-backed extraction enabled");
            let transport = HttpChatTransport::new(settings.base_url, settings.api_key);
            Some(Arc::new(ModelExtractor::new(transport, settings.model)))
        }
        None => {
            info!("No model API key configured; running with rule-based extraction only");
            None
        }
    };

    // A missing deals file degrades benchmarking, never startup
    let deals_path = licops_intake::config::resolve_deals_path(
        args.deals.as_deref().and_then(|p| p.to_str()),
        &toml_config,
    );
    let deal_book = match DealBook::from_csv_path(&deals_path) {
        Ok(book) => Some(book),
        Err(e) => {
            warn!(error = %e, "Historical deals unavailable; benchmark endpoint will return 503");
            None
        }
    };

    let state = AppState::new(model_extractor, deal_book);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("licops-intake listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
