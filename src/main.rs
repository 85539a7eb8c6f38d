use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod error;
mod fixtures;
mod models;
mod odds;
mod predict;
mod stats;
#[cfg(test)]
mod test_support;

use api::AppState;
use config::Config;
use fixtures::Understat;
use predict::{GaussianNb, OutcomeClassifier, Predictor};
use stats::{StatsProvider, TheSportsDB};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // The model is loaded once and shared read-only by every request.
    let model = GaussianNb::load(Path::new(&config.model_path))
        .with_context(|| format!("Failed to load model from {}", config.model_path))?;
    let classifier: Arc<dyn OutcomeClassifier> = Arc::new(model);
    info!("Model loaded: {} ({})", classifier.name(), config.model_path);

    let stats: Arc<dyn StatsProvider> = Arc::new(TheSportsDB::new(
        config.sportsdb_api_key.as_deref(),
        Some(config.sportsdb_api_url.as_str()),
        &config.league,
        config.http_timeout(),
    )?);
    let fixtures = Understat::new(
        Some(config.understat_url.as_str()),
        &config.understat_league,
        &config.season,
        config.http_timeout(),
    )?;
    info!(
        "Stats from {} ({}), fixtures from understat ({} {})",
        stats.name(),
        config.league,
        config.understat_league,
        config.season
    );

    let state = AppState {
        predictor: Predictor::new(stats, classifier, &config.league),
        fixtures: Arc::new(fixtures),
    };
    let app = api::router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("API listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
