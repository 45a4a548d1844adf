// src/web/types.rs
use crate::config::OutreachConfig;
use crate::extraction::JobParser;
use crate::outreach::{Profile, ProfileSearch};
use rocket::serde::{Deserialize, Serialize};

/// Shared, read-only state handed to every route
pub struct AppState {
    pub parser: JobParser,
    pub search: ProfileSearch,
    pub outreach: OutreachConfig,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ParseJobRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SearchProfilesRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DraftMessagesRequest {
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub intro: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_code: error_code.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}
