// src/config.rs
//! Configuration: built-in defaults, then an optional config.yaml, then environment overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::page_fetcher::DEFAULT_USER_AGENT;
use crate::extraction::content_reducer::DEFAULT_MAX_CHARS;

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    Cli,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub model: String,
    pub command: String,
    pub base_url: String,
    pub prompt_path: Option<PathBuf>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Cli,
            model: "mistral:7b".to_string(),
            command: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            prompt_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    Browser,
    Http,
}

impl Default for FetchBackend {
    fn default() -> Self {
        if cfg!(feature = "browser") {
            FetchBackend::Browser
        } else {
            FetchBackend::Http
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub backend: FetchBackend,
    /// Browser: network-idle wait. HTTP: response deadline.
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub headless: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            backend: FetchBackend::default(),
            timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub max_excerpt_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_excerpt_chars: DEFAULT_MAX_CHARS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://serpapi.com/search.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachConfig {
    pub sender_name: String,
    pub intro: Option<String>,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            sender_name: "Job Seeker".to_string(),
            intro: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub console: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from("app.log")),
            console: false,
            filter: "job_agent=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigManager {
    pub llm: LlmConfig,
    pub fetch: FetchConfig,
    pub extraction: ExtractionConfig,
    pub search: SearchConfig,
    pub outreach: OutreachConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

impl ConfigManager {
    /// Load configuration from `JOB_AGENT_CONFIG` (or ./config.yaml) and the environment
    pub fn load() -> Result<Self> {
        let path = std::env::var("JOB_AGENT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from a specific file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        info!("Loaded configuration (llm backend: {:?})", config.llm.backend);
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid configuration YAML")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("JOB_AGENT_LLM_BACKEND") {
            self.llm.backend = match backend.to_lowercase().as_str() {
                "cli" => LlmBackend::Cli,
                "http" => LlmBackend::Http,
                other => anyhow::bail!("Unknown JOB_AGENT_LLM_BACKEND: {}", other),
            };
        }
        if let Some(backend) = lookup("JOB_AGENT_FETCH_BACKEND") {
            self.fetch.backend = match backend.to_lowercase().as_str() {
                "browser" => FetchBackend::Browser,
                "http" => FetchBackend::Http,
                other => anyhow::bail!("Unknown JOB_AGENT_FETCH_BACKEND: {}", other),
            };
        }
        if let Some(model) = lookup("JOB_AGENT_MODEL") {
            self.llm.model = model;
        }
        if let Some(url) = lookup("OLLAMA_URL") {
            self.llm.base_url = url;
        }
        if let Some(path) = lookup("JOB_AGENT_PROMPT") {
            self.llm.prompt_path = Some(PathBuf::from(path));
        }
        if let Some(key) = lookup("SERPAPI_KEY") {
            self.search.api_key = Some(key);
        }
        if let Some(file) = lookup("JOB_AGENT_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
        if let Some(port) = lookup("JOB_AGENT_PORT") {
            self.server.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("JOB_AGENT_PORT must be a valid port number"))?;
        }
        Ok(())
    }
}
