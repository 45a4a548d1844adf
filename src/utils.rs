// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Collapse every run of whitespace into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Uppercase the first letter of each word and lowercase the rest
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keep only the part before the first comma
pub fn city_only(location: &str) -> String {
    location
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Write file content with proper error context
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Read file content as string with proper error context
pub fn read_file_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b   c "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sun life"), "Sun Life");
        assert_eq!(title_case("ACME corp"), "Acme Corp");
        assert_eq!(title_case("  spaced   out "), "Spaced Out");
    }

    #[test]
    fn test_city_only() {
        assert_eq!(city_only("Toronto, ON, Canada"), "Toronto");
        assert_eq!(city_only("  Berlin "), "Berlin");
        assert_eq!(city_only(""), "");
    }
}
