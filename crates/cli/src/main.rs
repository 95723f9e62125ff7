use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use delivery_notifier_core::{
    create_event_system, load_config, load_default_config, run_batch, validate_config, Config,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming the configuration file
const CONFIG_ENV: &str = "NOTIFIER_CONFIG";

/// Buffer size for the pipeline event channel
const EVENT_BUFFER_SIZE: usize = 256;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = load_configuration();

    // Logging comes up before config errors are reported so they get logged
    let filter = config
        .as_ref()
        .map(|c| c.logging.filter.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(&filter);

    let config = config?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(version = VERSION, mode = ?config.mode, "Starting delivery notifier");

    let (events, collector) = create_event_system(EVENT_BUFFER_SIZE);
    let collector = tokio::spawn(collector.run());

    let summary = run_batch(&config, Some(events))
        .await
        .context("Failed to create HTTP client")?;

    match collector.await {
        Ok(events) => info!(events = events.len(), "Pipeline events collected"),
        Err(e) => warn!("Event collector stopped unexpectedly: {}", e),
    }

    let summary_json = serde_json::to_string(&summary).unwrap_or_default();
    info!(summary = %summary_json, "Results sent to relevant APIs");

    Ok(())
}

fn load_configuration() -> Result<Config> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let path = PathBuf::from(path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) => load_default_config().context("Failed to load default configuration"),
    }
}

fn init_logging(fallback_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
