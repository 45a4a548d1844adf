// src/extraction/pipeline.rs
use super::company_resolver::resolve_company;
use super::content_reducer::extract_relevant_text;
use super::html_fallback::extract_title_location;
use super::merger::{merge_records, needs_fallback};
use super::structured_output::StructuredOutputExtractor;
use super::{JobRecord, PromptTemplate};
use crate::config::{ConfigManager, FetchBackend, LlmBackend};
use crate::core::{HttpFetcher, LanguageModel, OllamaCli, OllamaHttp, PageFetcher};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// URL in, canonical [`JobRecord`] out. Holds no per-call state, so one instance
/// can serve concurrent extractions.
#[derive(Clone)]
pub struct JobParser {
    fetcher: Arc<dyn PageFetcher>,
    model: Arc<dyn LanguageModel>,
    prompts: Arc<PromptTemplate>,
    max_excerpt_chars: usize,
}

impl JobParser {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        model: Arc<dyn LanguageModel>,
        prompts: PromptTemplate,
        max_excerpt_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            model,
            prompts: Arc::new(prompts),
            max_excerpt_chars,
        }
    }

    /// Wire the configured fetch and model backends
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        let timeout = Duration::from_secs(config.fetch.timeout_seconds);
        let fetcher: Arc<dyn PageFetcher> = match config.fetch.backend {
            FetchBackend::Http => Arc::new(HttpFetcher::new(&config.fetch.user_agent, timeout)?),
            #[cfg(feature = "browser")]
            FetchBackend::Browser => Arc::new(crate::core::BrowserFetcher::new(
                timeout,
                config.fetch.headless,
            )),
            #[cfg(not(feature = "browser"))]
            FetchBackend::Browser => {
                anyhow::bail!("Browser fetching requires building with the `browser` feature")
            }
        };

        let model: Arc<dyn LanguageModel> = match config.llm.backend {
            LlmBackend::Cli => Arc::new(OllamaCli::new(&config.llm.command, &config.llm.model)),
            LlmBackend::Http => Arc::new(OllamaHttp::new(&config.llm.base_url, &config.llm.model)?),
        };

        let prompts = PromptTemplate::load(config.llm.prompt_path.as_deref())?;

        Ok(Self::new(
            fetcher,
            model,
            prompts,
            config.extraction.max_excerpt_chars,
        ))
    }

    /// Fetch and extract. Only a fetch failure is returned as an error.
    pub async fn extract_job(&self, url: &str) -> Result<JobRecord> {
        let html = self.fetcher.fetch(url).await?;
        Ok(self.extract_from_html(url, &html).await)
    }

    /// Everything after the fetch; infallible.
    pub async fn extract_from_html(&self, url: &str, html: &str) -> JobRecord {
        let company = resolve_company(url);
        info!("URL-derived company: {:?}", company);

        let excerpt = extract_relevant_text(html, self.max_excerpt_chars);
        debug!("Relevant text length: {}", excerpt.chars().count());

        let candidate = StructuredOutputExtractor::new(self.model.as_ref(), &self.prompts)
            .extract(&excerpt)
            .await;

        let fallback = needs_fallback(&candidate).then(|| extract_title_location(html));

        let record = merge_records(candidate, fallback, company);
        info!("Extracted job data: {:?}", record);
        record
    }
}
