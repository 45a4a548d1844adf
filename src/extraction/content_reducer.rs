// src/extraction/content_reducer.rs
//! Reduce a page to the slice of visible text most likely to hold the job description.

use crate::utils::{collapse_whitespace, truncate_chars};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

pub const DEFAULT_MAX_CHARS: usize = 8000;

const SKIPPED_TAGS: [&str; 7] = ["script", "style", "noscript", "svg", "img", "video", "iframe"];

const JOB_KEYWORDS: [&str; 9] = [
    "job",
    "posting",
    "description",
    "jd",
    "apply",
    "vacancy",
    "position",
    "role",
    "opening",
];

/// Bounded plain-text excerpt of `html`. Never fails: if the document cannot be
/// reduced, the raw markup itself is truncated.
pub fn extract_relevant_text(html: &str, max_chars: usize) -> String {
    match reduce(html) {
        Some(text) => truncate_chars(&text, max_chars),
        None => truncate_chars(html, max_chars),
    }
}

fn reduce(html: &str) -> Option<String> {
    let main_selector = Selector::parse("main").ok()?;
    let container_selector = Selector::parse("section, div, article").ok()?;
    let body_selector = Selector::parse("body").ok()?;

    let document = Html::parse_document(html);

    let mut candidates: Vec<ElementRef<'_>> = Vec::new();
    candidates.extend(document.select(&main_selector).next());
    candidates.extend(
        document
            .select(&container_selector)
            .filter(|element| looks_relevant(element)),
    );
    candidates.extend(document.select(&body_selector).next());

    let mut best: Option<(usize, String)> = None;
    for candidate in candidates {
        let text = visible_text(candidate);
        let score = text.chars().count();
        if best.as_ref().map_or(true, |(best_score, _)| score > *best_score) {
            best = Some((score, text));
        }
    }

    let text = best
        .map(|(_, text)| text)
        .unwrap_or_else(|| visible_text(document.root_element()));
    Some(collapse_whitespace(&text))
}

fn looks_relevant(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    let attrs = format!(
        "{} {}",
        value.id().unwrap_or_default(),
        value.classes().collect::<Vec<_>>().join(" ")
    )
    .to_lowercase();

    JOB_KEYWORDS.iter().any(|keyword| attrs.contains(keyword))
}

/// Visible text of an element, fragments joined by single spaces, skipping
/// scripts, styles and embedded media.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut nodes = Vec::new();
    collect_text(element, &mut nodes);
    nodes
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Visible text as it reads on the page: nodes concatenated as-is, so a word
/// split across inline tags stays whole, then whitespace collapsed.
pub fn inline_text(element: ElementRef<'_>) -> String {
    let mut nodes = Vec::new();
    collect_text(element, &mut nodes);
    collapse_whitespace(&nodes.concat())
}

fn collect_text<'a>(element: ElementRef<'a>, nodes: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => nodes.push(&**text),
            Node::Element(el) if SKIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, nodes);
                }
            }
            _ => {}
        }
    }
}
