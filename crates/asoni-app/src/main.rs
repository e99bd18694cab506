use anyhow::{Context, Result};
use asoni_config::Config;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;

mod cli;
mod commands;
mod logging;

use self::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::new(),
    };

    logging::init(config.log_format);

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            ctrl_c.cancel();
        }
    });

    commands::run(cli, config, cancel).await
}
