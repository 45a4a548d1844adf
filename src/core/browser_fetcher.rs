// src/core/browser_fetcher.rs
//! Headless Chromium fetcher for boards that render their postings client-side.

use super::page_fetcher::{wait_for_load, LoadState, PageFetcher};
use anyhow::{Context, Result};
use async_trait::async_trait;
use playwright_rs::{GotoOptions, LaunchOptions, Playwright, WaitUntil};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct BrowserFetcher {
    settle_timeout: Duration,
    headless: bool,
}

impl BrowserFetcher {
    pub fn new(settle_timeout: Duration, headless: bool) -> Self {
        Self {
            settle_timeout,
            headless,
        }
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    /// Navigate and wait for network idle. If the page is still busy after
    /// `settle_timeout`, the DOM as rendered so far is returned.
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching HTML from {} with headless browser", url);

        let playwright = Playwright::launch()
            .await
            .context("Failed to start Playwright")?;

        let launch_options = LaunchOptions {
            headless: Some(self.headless),
            ..Default::default()
        };
        let browser = playwright
            .chromium()
            .launch_with_options(launch_options)
            .await
            .context("Failed to launch Chromium")?;

        let context = browser
            .new_context()
            .await
            .context("Failed to create browser context")?;
        let page = context.new_page().await.context("Failed to open page")?;

        let goto_opts = GotoOptions {
            wait_until: Some(WaitUntil::NetworkIdle),
            ..Default::default()
        };
        let navigation = async {
            page.goto(url, Some(goto_opts))
                .await
                .map(|_| ())
                .with_context(|| format!("Failed to navigate to {}", url))
        };

        if wait_for_load(self.settle_timeout, navigation).await? == LoadState::TimedOut {
            warn!(
                "{} not idle after {:?}, using partially loaded HTML",
                url, self.settle_timeout
            );
        }

        let inner = page
            .locator("html")
            .await
            .inner_html()
            .await
            .context("Failed to read page content")?;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }

        let html = format!("<html>{}</html>", inner);
        debug!("Fetched {} characters of HTML", html.len());
        Ok(html)
    }
}
