// src/extraction/prompts.rs
use super::{CandidateRecord, RequiredKey};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub const BASE_PROMPT: &str = r#"Extract job details from the provided input.
Return only a JSON object with keys exactly:
- title
- location
- company
- salary_range
- hiring_manager
- department
If any of the keys don't have a proper value, set their value to an empty string.

IMPORTANT OUTPUT RULES:
- Respond with a single JSON object only.
- Do not include any prose, explanations, or code fences.
- Every value must be a string.

For location, return only the city.
"#;

/// Static instructions shared by every extraction prompt. Loaded once per process.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    base: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            base: BASE_PROMPT.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Read the template from `path`, or use the built-in one when no path is configured
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let base = crate::utils::read_file_content(path)?;
                info!("Loaded prompt template from {}", path.display());
                Ok(Self::new(base))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// First-round prompt: strict JSON, no company inference, city-only location.
    pub fn extraction_prompt(&self, page_content: &str) -> String {
        format!(
            "{base}\n\n\
             You are analyzing ONLY the following page content excerpt (plain text extracted from HTML).\n\
             Your response MUST be a single JSON object (no prose, no code fences).\n\
             - Do NOT infer '{company}' from this content; set '{company}' to an empty string.\n\
             - For '{location}', return only the city if present.\n\n\
             PAGE CONTENT:\n\
             {page_content}\n",
            base = self.base,
            company = RequiredKey::Company.as_str(),
            location = RequiredKey::Location.as_str(),
        )
    }

    /// Repair prompt: same rules plus an empty template to fill in.
    pub fn repair_prompt(&self, page_content: &str) -> String {
        format!(
            "{base}\n\n\
             Output exactly one JSON object and nothing else.\n\
             Use this template and fill in values (keep missing values as empty strings):\n\
             {skeleton}\n\n\
             PAGE CONTENT:\n\
             {page_content}\n",
            base = self.base,
            skeleton = json_skeleton(),
        )
    }
}

/// Pretty-printed object with every required key set to ""
pub fn json_skeleton() -> String {
    serde_json::to_string_pretty(&CandidateRecord::default()).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_lists_every_key_in_order() {
        let skeleton = json_skeleton();
        let positions: Vec<usize> = RequiredKey::ALL
            .iter()
            .map(|key| skeleton.find(&format!("\"{}\": \"\"", key.as_str())).unwrap())
            .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_extraction_prompt_layout() {
        let template = PromptTemplate::new("BASE");
        let prompt = template.extraction_prompt("Senior Engineer in Toronto");

        assert!(prompt.starts_with("BASE\n\n"));
        assert!(prompt.contains("Do NOT infer 'company'"));
        assert!(prompt.ends_with("PAGE CONTENT:\nSenior Engineer in Toronto\n"));
    }

    #[test]
    fn test_repair_prompt_contains_skeleton() {
        let template = PromptTemplate::default();
        let prompt = template.repair_prompt("excerpt");

        assert!(prompt.starts_with(BASE_PROMPT));
        assert!(prompt.contains(&json_skeleton()));
        assert!(prompt.ends_with("PAGE CONTENT:\nexcerpt\n"));
    }

    #[test]
    fn test_load_without_path_uses_builtin() {
        let template = PromptTemplate::load(None).unwrap();
        assert_eq!(template.base(), BASE_PROMPT);
    }
}
