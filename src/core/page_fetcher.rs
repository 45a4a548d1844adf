// src/core/page_fetcher.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page HTML. May be partially loaded if the page never settles
    /// within the fetcher's own timeout. Errors here are fatal for the extraction.
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Settled,
    TimedOut,
}

/// Wait up to `limit` for `load`. Running out of time is not an error; the
/// caller reads whatever has arrived. A failure inside `load` is.
pub async fn wait_for_load<F>(limit: Duration, load: F) -> Result<LoadState>
where
    F: Future<Output = Result<()>>,
{
    match tokio::time::timeout(limit, load).await {
        Ok(Ok(())) => Ok(LoadState::Settled),
        Ok(Err(e)) => Err(e),
        Err(_) => Ok(LoadState::TimedOut),
    }
}

/// Plain GET. No script execution, so client-rendered boards only yield their shell.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching HTML from {}", url);
        let started = Instant::now();

        let mut response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| anyhow::anyhow!("Timed out waiting for a response from {}", url))?
            .with_context(|| format!("Failed to fetch job post: {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error fetching {}: {}", url, response.status());
        }

        let mut body = Vec::new();
        let read_body = async {
            while let Some(chunk) = response
                .chunk()
                .await
                .context("Failed to read response body")?
            {
                body.extend_from_slice(&chunk);
            }
            Ok::<(), anyhow::Error>(())
        };

        let remaining = self.timeout.saturating_sub(started.elapsed());
        if wait_for_load(remaining, read_body).await? == LoadState::TimedOut {
            warn!("Body of {} still loading after {:?}, using partial HTML", url, self.timeout);
        }

        let html = String::from_utf8_lossy(&body).into_owned();
        debug!("Fetched {} characters of HTML", html.len());
        Ok(html)
    }
}
