//! Prints the sector ranking of the configured result view as JSON.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use eeio_results::adapters::WebApiModel;
use eeio_results::application::{CalculateHeatmapHandler, SelectIndicatorsHandler};
use eeio_results::config::{AppConfig, ConfigError, LoggingConfig};
use eeio_results::ports::{ModelError, ModelReader};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Model request failed: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.logging);

    let model: Arc<dyn ModelReader> = Arc::new(WebApiModel::new(config.api.web_api_config()));
    tracing::info!(
        endpoint = %config.api.endpoint,
        model = %config.api.model_id,
        perspective = %config.results.perspective,
        "Computing sector ranking"
    );

    let indicators = SelectIndicatorsHandler::new(Arc::clone(&model))
        .handle(&config.results.indicators)
        .await?;
    let heatmap = CalculateHeatmapHandler::new(Arc::clone(&model))
        .handle(&config.results)
        .await?;
    let ranking = heatmap.ranked(&config.results.ranking_query(indicators));

    println!("{}", serde_json::to_string_pretty(&ranking)?);
    Ok(())
}
