// src/outreach/profile_search.rs
use super::Profile;
use crate::utils::collapse_whitespace;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

const SITE_FILTER: &str = "site:linkedin.com/in";
const EXCLUDE_FILTER: &str = "-student -intern";
const MANAGER_TERM: &str = r#"("lead" OR "manager")"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    IndividualContributor,
    LeadManager,
}

impl QueryType {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryType::IndividualContributor => "individual_contributor",
            QueryType::LeadManager => "lead_manager",
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

pub struct ProfileSearch {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ProfileSearch {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// LinkedIn profiles for people likely on the hiring team, individual
    /// contributors first, deduplicated by URL.
    pub async fn search_profiles(
        &self,
        job_title: &str,
        company: &str,
        location: &str,
    ) -> Result<Vec<Profile>> {
        let mut profiles = Vec::new();

        for query_type in [QueryType::IndividualContributor, QueryType::LeadManager] {
            let query = build_query(job_title, company, location, query_type);
            info!("Searching profiles ({}) with query: {}", query_type.as_str(), query);

            let results = self.run_query(&query).await?;
            profiles.extend(
                results
                    .into_iter()
                    .filter(|r| !r.link.is_empty())
                    .map(|r| Profile {
                        title: r.title,
                        url: r.link,
                        query_type: query_type.as_str().to_string(),
                        company: company.to_string(),
                    }),
            );
        }

        let profiles = dedupe_by_url(profiles);
        info!("Found {} candidate profiles", profiles.len());
        Ok(profiles)
    }

    async fn run_query(&self, query: &str) -> Result<Vec<OrganicResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("SERPAPI_KEY environment variable not set")?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("engine", "google"), ("api_key", api_key)])
            .send()
            .await
            .context("Failed to send request to search API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!("Search API error {}: {}", status, error_text);
            anyhow::bail!("Search API returned error {}: {}", status, error_text);
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .context("Failed to parse search API response")?;

        Ok(parsed.organic_results)
    }
}

/// Role keywords inferred from the job title
pub fn role_query(job_title: &str) -> &'static str {
    let title = job_title.to_lowercase();
    if title.contains("machine learning") || title.contains(" ml") || title.starts_with("ml") {
        r#""Machine Learning" OR ML OR "Machine Learning Engineer""#
    } else if title.contains("artificial intelligence")
        || title.contains(" ai")
        || title.starts_with("ai")
    {
        r#""Artificial Intelligence" OR AI OR "AI Engineer""#
    } else {
        r#"software OR SWE OR SDE OR "Software Engineer" OR "Software Developer""#
    }
}

pub fn build_query(job_title: &str, company: &str, location: &str, query_type: QueryType) -> String {
    let quoted = |value: &str| {
        let value = value.trim();
        if value.is_empty() {
            String::new()
        } else {
            format!("\"{}\"", value)
        }
    };

    let manager = match query_type {
        QueryType::IndividualContributor => "",
        QueryType::LeadManager => MANAGER_TERM,
    };

    collapse_whitespace(&format!(
        "{} ({}) {} {} {} {}",
        SITE_FILTER,
        role_query(job_title),
        manager,
        quoted(company),
        quoted(location),
        EXCLUDE_FILTER
    ))
}

pub fn dedupe_by_url(profiles: Vec<Profile>) -> Vec<Profile> {
    let mut seen = HashSet::new();
    profiles
        .into_iter()
        .filter(|p| seen.insert(p.url.clone()))
        .collect()
}
