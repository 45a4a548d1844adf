// src/extraction/structured_output.rs
//! Two-round negotiation with the language model for a structured record.

use super::json_recovery::extract_json_object;
use super::{CandidateRecord, PromptTemplate, RequiredKey};
use crate::core::LanguageModel;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub struct StructuredOutputExtractor<'a> {
    model: &'a dyn LanguageModel,
    prompts: &'a PromptTemplate,
}

impl<'a> StructuredOutputExtractor<'a> {
    pub fn new(model: &'a dyn LanguageModel, prompts: &'a PromptTemplate) -> Self {
        Self { model, prompts }
    }

    /// Ask the model for the record, repairing once on non-JSON output.
    /// Never fails; the worst case is an all-empty candidate. `company` is always empty.
    pub async fn extract(&self, page_content: &str) -> CandidateRecord {
        let first = self
            .ask(&self.prompts.extraction_prompt(page_content))
            .await;

        let recovered = match extract_json_object(&first) {
            Some(object) => Some(object),
            None => {
                info!("Model returned non-JSON output, re-prompting with an explicit template");
                let repaired = self.ask(&self.prompts.repair_prompt(page_content)).await;
                extract_json_object(&repaired)
            }
        };

        if recovered.is_none() {
            warn!("Model output still not valid JSON after repair, using empty record");
        }

        let mut candidate = normalize_job_data(recovered.as_ref());
        candidate.company.clear();
        candidate
    }

    async fn ask(&self, prompt: &str) -> String {
        debug!("Sending prompt to language model ({} chars)", prompt.len());
        match self.model.complete(prompt).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Language model completion failed: {:#}", e);
                String::new()
            }
        }
    }
}

/// Map a recovered object onto the fixed key set: unknown keys dropped, missing or
/// null values empty, everything else stringified and trimmed.
pub fn normalize_job_data(object: Option<&Map<String, Value>>) -> CandidateRecord {
    let mut record = CandidateRecord::default();
    let Some(object) = object else {
        return record;
    };

    for key in RequiredKey::ALL {
        let value = object
            .get(key.as_str())
            .or_else(|| {
                object
                    .iter()
                    .find(|(k, _)| RequiredKey::from_model_key(k) == Some(key))
                    .map(|(_, v)| v)
            })
            .map(stringify)
            .unwrap_or_default();

        *record.field_mut(key) = value;
    }

    record
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct ScriptedModel {
        responses: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    #[test]
    fn test_normalize_coerces_and_defaults() {
        let object = json!({
            "title": "  Staff Engineer ",
            "location": null,
            "salary range": 120000,
            "hiring_manager": ["Jane"],
            "department": true,
            "benefits": "dental"
        });

        let record = normalize_job_data(object.as_object());
        assert_eq!(record.title, "Staff Engineer");
        assert_eq!(record.location, "");
        assert_eq!(record.company, "");
        assert_eq!(record.salary_range, "120000");
        assert_eq!(record.hiring_manager, "[\"Jane\"]");
        assert_eq!(record.department, "true");
    }

    #[test]
    fn test_normalize_missing_object() {
        assert_eq!(normalize_job_data(None), CandidateRecord::default());
    }

    #[tokio::test]
    async fn test_valid_first_round_skips_repair() {
        let model = ScriptedModel::new(vec![Ok(
            r#"{"title":"SWE","location":"Toronto","company":"Wrong Corp"}"#.to_string(),
        )]);
        let prompts = PromptTemplate::default();

        let record = StructuredOutputExtractor::new(&model, &prompts)
            .extract("excerpt")
            .await;

        assert_eq!(model.prompt_count(), 1);
        assert_eq!(record.title, "SWE");
        assert_eq!(record.location, "Toronto");
        assert_eq!(record.company, "");
    }

    #[tokio::test]
    async fn test_repair_round_after_prose() {
        let model = ScriptedModel::new(vec![
            Ok("The job is for a data scientist.".to_string()),
            Ok("```json\n{\"title\": \"Data Scientist\"}\n```".to_string()),
        ]);
        let prompts = PromptTemplate::default();

        let record = StructuredOutputExtractor::new(&model, &prompts)
            .extract("excerpt")
            .await;

        assert_eq!(model.prompt_count(), 2);
        assert!(model.prompts.lock().unwrap()[1].contains("Use this template"));
        assert_eq!(record.title, "Data Scientist");
    }

    #[tokio::test]
    async fn test_two_failures_yield_empty_record() {
        let model = ScriptedModel::new(vec![
            Ok("nope".to_string()),
            Err(anyhow::anyhow!("model crashed")),
        ]);
        let prompts = PromptTemplate::default();

        let record = StructuredOutputExtractor::new(&model, &prompts)
            .extract("excerpt")
            .await;

        assert_eq!(model.prompt_count(), 2);
        assert_eq!(record, CandidateRecord::default());
    }
}
