pub mod api; // HTTP surface: router, middleware, server lifecycle
pub mod config;
pub mod inference; // Symptom → condition rules, triage, recommendations
pub mod models;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::api::{ApiContext, ApiServer};
use crate::config::ServerConfig;
use crate::inference::{DefaultSymptomAnalyzer, SymptomConditionTable};

/// Install the global tracing subscriber (`RUST_LOG` wins over the default filter).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load the symptom table, serve the API, and stop on Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), String> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let table = SymptomConditionTable::load_or_bundled(Some(&config.reference_dir))
        .map_err(|e| e.to_string())?;
    tracing::info!(symptoms = table.len(), "Symptom table loaded");

    let analyzer = Arc::new(DefaultSymptomAnalyzer::new(Arc::new(table)));
    let ctx = ApiContext::new(analyzer, &config);

    let mut server = ApiServer::start(ctx, config.bind).await?;
    tracing::info!(addr = %server.addr, "Accepting requests");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.wait().await;
    Ok(())
}
