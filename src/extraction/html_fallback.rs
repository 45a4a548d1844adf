// src/extraction/html_fallback.rs
//! Heuristic title and city recovery straight from the markup, used when the model comes back empty.

use super::content_reducer::inline_text;
use super::FallbackFields;
use crate::utils::{city_only, collapse_whitespace};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

const LABEL_TAGS: &str = "div, li, p, span, dt, th";
const LABEL_PREFIX: &str = "location";

/// Fields read from a schema.org JobPosting linked-data block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPostingData {
    pub title: String,
    pub city: String,
}

/// Best-effort title and city from raw HTML. Never fails; misses leave fields empty.
pub fn extract_title_location(html: &str) -> FallbackFields {
    let document = Html::parse_document(html);
    let job_posting = job_posting_from_json_ld(&document);

    let title = [
        meta_content(&document, "meta[property='og:title']"),
        meta_content(&document, "meta[name='twitter:title']"),
        first_text(&document, "h1"),
        first_text(&document, "title"),
        job_posting.as_ref().map(|jp| jp.title.clone()),
    ]
    .into_iter()
    .flatten()
    .find(|t| !t.is_empty())
    .unwrap_or_default();

    let location = job_posting
        .map(|jp| jp.city)
        .filter(|city| !city.is_empty())
        .or_else(|| first_text(&document, "[itemprop='addressLocality']"))
        .or_else(|| labelled_location(&document))
        .map(|loc| city_only(&loc))
        .unwrap_or_default();

    debug!(
        "HTML fallback found title={:?} location={:?}",
        title, location
    );

    FallbackFields { title, location }
}

fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
    (!text.is_empty()).then_some(text)
}

/// First JobPosting object across all `application/ld+json` blocks.
/// Blocks that fail to parse are skipped individually.
pub fn job_posting_from_json_ld(document: &Html) -> Option<JobPostingData> {
    let selector = Selector::parse("script[type='application/ld+json']").ok()?;

    document.select(&selector).find_map(|script| {
        let raw = script.text().collect::<String>();
        let raw = raw
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();

        match serde_json::from_str::<Value>(raw) {
            Ok(data) => find_job_posting(&data).map(read_job_posting),
            Err(e) => {
                debug!("Skipping unparsable JSON-LD block: {}", e);
                None
            }
        }
    })
}

fn find_job_posting(data: &Value) -> Option<&Value> {
    match data {
        Value::Array(items) => items.iter().find_map(find_job_posting),
        Value::Object(object) => {
            if is_job_posting(data) {
                return Some(data);
            }
            object
                .get("@graph")
                .and_then(Value::as_array)
                .and_then(|graph| graph.iter().find(|item| is_job_posting(item)))
        }
        _ => None,
    }
}

fn is_job_posting(object: &Value) -> bool {
    let Some(type_value) = object.get("@type").or_else(|| object.get("type")) else {
        return false;
    };

    let types: Vec<String> = match type_value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        Value::String(s) => vec![s.to_lowercase()],
        other => vec![other.to_string().to_lowercase()],
    };

    types.iter().any(|t| t.contains("jobposting"))
}

fn read_job_posting(posting: &Value) -> JobPostingData {
    let title = ["title", "name"]
        .iter()
        .filter_map(|key| posting.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string();

    let locations: Vec<&Value> = match posting.get("jobLocation") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single],
    };

    let city = locations
        .into_iter()
        .filter_map(|loc| loc.get("address"))
        .filter_map(|address| address.get("addressLocality").and_then(Value::as_str))
        .map(str::trim)
        .find(|city| !city.is_empty())
        .unwrap_or_default()
        .to_string();

    JobPostingData { title, city }
}

/// "Location" label scan: read the sibling after the innermost matching label,
/// or the rest of the label's own text.
fn labelled_location(document: &Html) -> Option<String> {
    let selector = Selector::parse(LABEL_TAGS).ok()?;
    let mut label = document.select(&selector).find(is_location_label)?;

    while let Some(inner) = label.select(&selector).find(is_location_label) {
        label = inner;
    }

    sibling_text(label)
        .or_else(|| inline_value(label))
        .filter(|text| !text.is_empty())
}

fn is_location_label(element: &ElementRef<'_>) -> bool {
    strip_label(&inline_text(*element)).is_some()
}

/// Text after a leading "location", matched case-insensitively
fn strip_label(text: &str) -> Option<&str> {
    let prefix = text.get(..LABEL_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(LABEL_PREFIX)
        .then(|| &text[LABEL_PREFIX.len()..])
}

fn sibling_text(label: ElementRef<'_>) -> Option<String> {
    for sibling in label.next_siblings() {
        match sibling.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(collapse_whitespace(trimmed));
                }
            }
            Node::Element(_) => {
                let element = ElementRef::wrap(sibling)?;
                let text = inline_text(element);
                return (!text.is_empty()).then_some(text);
            }
            _ => {}
        }
    }
    None
}

fn inline_value(label: ElementRef<'_>) -> Option<String> {
    let text = inline_text(label);
    let value = strip_label(&text)?.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    (!value.is_empty()).then(|| value.to_string())
}
