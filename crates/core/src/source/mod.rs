//! Producers of raw command tokens.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{config::QueueConfig, Result};

/// Where commands come from.
#[derive(Debug)]
pub enum CommandSource {
    /// A single command, typically from the command line.
    Once(String),
    /// A remote queue polled over HTTP.
    Queue(QueuePoller),
}

impl CommandSource {
    pub fn queue(endpoint: impl Into<String>, config: &QueueConfig) -> Result<Self> {
        Ok(Self::Queue(QueuePoller::new(endpoint, config)?))
    }

    /// Feeds commands into `commands`.
    ///
    /// A one-shot source never completes after its command has been sent, so
    /// the process keeps showing the animation. A queue source only returns on
    /// a transport failure or once the receiving side is gone.
    pub async fn feed(self, commands: mpsc::Sender<String>) -> Result<()> {
        match self {
            Self::Once(raw) => {
                if commands.send(raw).await.is_err() {
                    return Ok(());
                }
                std::future::pending().await
            }
            Self::Queue(poller) => poller.feed(commands).await,
        }
    }
}

/// Long-polls a queue endpoint. Every `200 OK` body, trimmed, is one command.
#[derive(Debug)]
pub struct QueuePoller {
    client: Client,
    endpoint: String,
    retry_delay: Duration,
}

impl QueuePoller {
    pub fn new(endpoint: impl Into<String>, config: &QueueConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: endpoint.into(),
            retry_delay: config.retry_delay(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs one request. Non-200 answers carry no command.
    pub async fn poll(&self) -> Result<Option<String>> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            Ok(Some(body.trim().to_string()))
        } else {
            warn!(%status, "queue returned no command");
            Ok(None)
        }
    }

    pub async fn feed(&self, commands: mpsc::Sender<String>) -> Result<()> {
        info!(endpoint = %self.endpoint, "polling command queue");
        loop {
            match self.poll().await? {
                Some(raw) => {
                    if commands.send(raw).await.is_err() {
                        debug!("command receiver dropped, stopping queue poller");
                        return Ok(());
                    }
                }
                None => tokio::time::sleep(self.retry_delay).await,
            }
        }
    }
}
