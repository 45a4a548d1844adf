// src/extraction/json_recovery.rs
//! Recover a JSON object from free-form model output.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

type JsonObject = Map<String, Value>;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```(?:json)?\s*([\s\S]*?)\s*```").expect("valid fenced block regex")
});

/// Ordered strategies; the first one yielding an object wins.
const STRATEGIES: [(&str, fn(&str) -> Option<JsonObject>); 3] = [
    ("direct", parse_direct),
    ("fenced", parse_fenced_block),
    ("braced", parse_brace_span),
];

/// Try each recovery strategy in order and return the first JSON object found.
pub fn extract_json_object(text: &str) -> Option<JsonObject> {
    STRATEGIES.iter().find_map(|(name, strategy)| {
        let recovered = strategy(text);
        if recovered.is_some() {
            tracing::debug!("Recovered JSON object via {} strategy", name);
        }
        recovered
    })
}

fn as_object(candidate: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

pub fn parse_direct(text: &str) -> Option<JsonObject> {
    as_object(text.trim())
}

pub fn parse_fenced_block(text: &str) -> Option<JsonObject> {
    let captures = FENCED_BLOCK.captures(text)?;
    as_object(captures.get(1)?.as_str())
}

pub fn parse_brace_span(text: &str) -> Option<JsonObject> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    as_object(&text[start..=end])
}
