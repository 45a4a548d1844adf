// src/core/llm_client.rs
//! Language model backends. Output is untrusted free text; callers do their own parsing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info};

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt, get raw completion text back
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Runs `<command> run <model>` and pipes the prompt through stdin.
pub struct OllamaCli {
    command: String,
    model: String,
}

impl OllamaCli {
    pub fn new(command: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaCli {
    async fn complete(&self, prompt: &str) -> Result<String> {
        info!("Running {} run {}", self.command, self.model);

        let mut child = Command::new(&self.command)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn model command: {}", self.command))?;

        let mut stdin = child
            .stdin
            .take()
            .context("Model process has no stdin handle")?;
        stdin
            .write_all(prompt.as_bytes())
            .await
            .context("Failed to write prompt to model process")?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .context("Failed to read model process output")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Model process exited with {}: {}", output.status, stderr.trim());
            anyhow::bail!("Model process exited with {}", output.status);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Talks to an Ollama server's `/api/generate` endpoint.
pub struct OllamaHttp {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaHttp {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaHttp {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        info!("Sending completion request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .context("Failed to send request to model server")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Model server error {}: {}", status, error_text);
            anyhow::bail!("Model server returned error {}: {}", status, error_text);
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse model server response")?;

        Ok(generated.response)
    }
}
