// src/main.rs
mod config;
mod handlers;
mod models;
mod mojang;
mod poller;
mod storage;
mod utils;

use std::sync::Arc;
use env_logger::Env;
use log::{error, info, warn};
use tokio::sync::Notify;
use crate::config::Config;
use crate::mojang::MojangClient;
use crate::poller::{Poller, StatusClient};
use crate::storage::portraits::PortraitCache;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load();
    info!(
        "Portraits in {}, markers under {}",
        config.portraits.display(),
        config.unmined.display()
    );

    // One client for the status endpoint and the skin service
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let portraits = PortraitCache::new(
        config.portraits.clone(),
        MojangClient::new(client.clone(), config.profile_url.clone()),
    );
    if tokio::fs::metadata(portraits.fallback_path()).await.is_err() {
        warn!(
            "Fallback portrait {} is missing, players on the default skin will be skipped",
            portraits.fallback_path().display()
        );
    }

    let status = StatusClient::new(client, config.carpet_url.clone(), config.carpet_secret.clone());
    let poller = Poller::new(status, portraits, config.unmined.clone(), config.poll_interval());

    if config.once {
        poller.tick().await;
        return Ok(());
    }

    let shutdown = Arc::new(Notify::new());
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal.notify_one(),
            Err(e) => error!("Unable to listen for ctrl+c: {}", e),
        }
    });

    poller.run(shutdown).await;
    Ok(())
}
