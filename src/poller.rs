// src/poller.rs
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, error, info};
use tokio::sync::Notify;
use crate::handlers::snapshot::process_snapshot;
use crate::models::ServerSnapshot;
use crate::mojang::SkinService;
use crate::storage::portraits::PortraitCache;
use crate::utils::PollError;

pub const SECRET_HEADER: &str = "X-Carpet";

/// Fetches status snapshots over a client shared with the skin lookups.
pub struct StatusClient {
    client: reqwest::Client,
    url: String,
    secret: String,
}

impl StatusClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            secret: secret.into(),
        }
    }

    pub async fn fetch(&self) -> Result<ServerSnapshot, PollError> {
        let response = self
            .client
            .get(&self.url)
            .header(SECRET_HEADER, &self.secret)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::HttpStatus(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

pub struct Poller<S> {
    status: StatusClient,
    portraits: PortraitCache<S>,
    unmined_folder: PathBuf,
    interval: Duration,
}

impl<S: SkinService> Poller<S> {
    pub fn new(
        status: StatusClient,
        portraits: PortraitCache<S>,
        unmined_folder: impl Into<PathBuf>,
        interval: Duration,
    ) -> Self {
        Self {
            status,
            portraits,
            unmined_folder: unmined_folder.into(),
            interval,
        }
    }

    /// One poll: fetch, then process. A failed fetch leaves last tick's files alone.
    pub async fn tick(&self) {
        let snapshot = match self.status.fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("{}", e);
                return;
            }
        };
        debug!("Server reports {} online since {}", snapshot.online, snapshot.start_time);
        process_snapshot(&snapshot, &self.portraits, &self.unmined_folder).await;
    }

    /// Polls until `shutdown` fires. The signal is only looked at while
    /// sleeping, so a started tick always runs to completion.
    pub async fn run(&self, shutdown: Arc<Notify>) {
        info!("Polling {} every {}s", self.status.url, self.interval.as_secs());
        loop {
            self.tick().await;

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.notified() => {
                    info!("Shutdown requested, stopping poller");
                    break;
                }
            }
        }
    }
}
