//! Notes server binary entry point

use anyhow::{Context, Result};
use clap::Parser;
use notes_server::{start_server, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::parse();
    log::debug!("Configuration: {:?}", config);

    let addr = config.addr.clone();
    start_server(AppState::new(config))
        .await
        .with_context(|| format!("Server on {} failed", addr))?;

    Ok(())
}
