//! ISC classifier daemon.
//!
//! Normalizes free-text surgical procedure names and classifies them
//! against the registry of nationally mandated surveillance procedures.

use anyhow::Result;
use iscd::config::Config;
use iscd::normalizer::Normalizer;
use iscd::server::{self, AppState};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("iscd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();

    let normalizer = Normalizer::from_env(config.llm.clone())?;
    if normalizer.remote_enabled() {
        info!("Remote normalization enabled (model: {})", config.llm.model);
    } else {
        info!("No credential in environment, using local normalization only");
    }

    let state = AppState::new(normalizer);
    server::run(&config.server, state).await
}
