// src/core/mod.rs
//! Collaborators the extraction pipeline depends on: page fetching and text completion

#[cfg(feature = "browser")]
pub mod browser_fetcher;
pub mod llm_client;
pub mod page_fetcher;

#[cfg(test)]
pub(crate) mod test_server;

#[cfg(feature = "browser")]
pub use browser_fetcher::BrowserFetcher;
pub use llm_client::{LanguageModel, OllamaCli, OllamaHttp};
pub use page_fetcher::{HttpFetcher, PageFetcher};
