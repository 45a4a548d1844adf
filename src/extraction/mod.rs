// src/extraction/mod.rs
use serde::{Deserialize, Serialize};

pub mod company_resolver;
pub mod content_reducer;
pub mod html_fallback;
pub mod json_recovery;
pub mod merger;
pub mod pipeline;
pub mod prompts;
pub mod structured_output;

pub use pipeline::JobParser;
pub use prompts::PromptTemplate;

/// Canonical job posting. Every field is always present; unknown values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub location: String,
    pub company: String,
    pub salary_range: String,
    pub hiring_manager: String,
    pub department: String,
}

/// Partially populated record coming from a single extraction source, before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub title: String,
    pub location: String,
    pub company: String,
    pub salary_range: String,
    pub hiring_manager: String,
    pub department: String,
}

/// Title and location recovered from raw HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackFields {
    pub title: String,
    pub location: String,
}

/// The fixed key set the model is asked to fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredKey {
    Title,
    Location,
    Company,
    SalaryRange,
    HiringManager,
    Department,
}

impl RequiredKey {
    pub const ALL: [RequiredKey; 6] = [
        RequiredKey::Title,
        RequiredKey::Location,
        RequiredKey::Company,
        RequiredKey::SalaryRange,
        RequiredKey::HiringManager,
        RequiredKey::Department,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequiredKey::Title => "title",
            RequiredKey::Location => "location",
            RequiredKey::Company => "company",
            RequiredKey::SalaryRange => "salary_range",
            RequiredKey::HiringManager => "hiring_manager",
            RequiredKey::Department => "department",
        }
    }

    /// Match a key as written by the model: case-insensitive, spaces and hyphens read as underscores.
    pub fn from_model_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL.into_iter().find(|k| k.as_str() == normalized)
    }
}

impl CandidateRecord {
    pub fn field_mut(&mut self, key: RequiredKey) -> &mut String {
        match key {
            RequiredKey::Title => &mut self.title,
            RequiredKey::Location => &mut self.location,
            RequiredKey::Company => &mut self.company,
            RequiredKey::SalaryRange => &mut self.salary_range,
            RequiredKey::HiringManager => &mut self.hiring_manager,
            RequiredKey::Department => &mut self.department,
        }
    }
}
