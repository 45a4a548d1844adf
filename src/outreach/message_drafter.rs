// src/outreach/message_drafter.rs
use super::{DraftedMessage, Profile};
use crate::config::OutreachConfig;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use regex::Regex;

pub const INTRO_PARAGRAPH: &str = "I'm currently exploring new engineering roles and reaching out to people \
whose work I admire. I've been building backend services and developer tooling, and I'm keen to learn \
from engineers who have grown with their teams.";

pub const CURIOSITY_PARAGRAPH: &str = "I'm especially curious about how your team supports new hires and the \
kinds of projects engineers tackle. Given your experience, I'd really appreciate hearing how the organization \
empowers engineers to grow.";

pub const CLOSE_PARAGRAPH: &str = "Would you be open to a quick 20-30 minute chat sometime this week or next? \
I'm happy to work around your schedule and connect virtually.";

static STANDALONE_AT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bat\b").expect("valid 'at' regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[|,/]").expect("valid separator regex"));

/// Attach a personalised outreach message to every profile
pub fn draft_messages(profiles: &[Profile], config: &OutreachConfig) -> Vec<DraftedMessage> {
    let intro = config.intro.as_deref().unwrap_or(INTRO_PARAGRAPH);

    profiles
        .iter()
        .map(|profile| DraftedMessage {
            profile: profile.clone(),
            message: compose(profile, intro, &config.sender_name),
        })
        .collect()
}

fn compose(profile: &Profile, intro: &str, sender_name: &str) -> String {
    let name = candidate_name(&profile.title);
    let name = if name.is_empty() { "there" } else { name.as_str() };

    let opener = if profile.company.trim().is_empty() {
        "I came across your profile while researching opportunities".to_string()
    } else {
        format!(
            "I came across your profile while researching opportunities at {}",
            profile.company.trim()
        )
    };

    [
        format!("Hi {},", name),
        String::new(),
        intro.to_string(),
        format!(
            "{} and would love to learn more about the engineering culture and how the team supports new hires.",
            opener
        ),
        CURIOSITY_PARAGRAPH.to_string(),
        CLOSE_PARAGRAPH.to_string(),
        String::new(),
        "Thanks so much,".to_string(),
        sender_name.to_string(),
    ]
    .join("\n")
}

/// Person's name from a search result title such as "Jane Doe - Senior Engineer at Acme"
pub fn candidate_name(title: &str) -> String {
    let before_dash = title.split('-').next().unwrap_or_default();
    let before_at = STANDALONE_AT.split(before_dash).next().unwrap_or_default();
    collapse_whitespace(&SEPARATORS.replace_all(before_at, " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(title: &str, company: &str) -> Profile {
        Profile {
            title: title.to_string(),
            url: "https://linkedin.com/in/someone".to_string(),
            query_type: "individual_contributor".to_string(),
            company: company.to_string(),
        }
    }

    #[test]
    fn test_candidate_name() {
        assert_eq!(candidate_name("Jane Doe - Senior Engineer"), "Jane Doe");
        assert_eq!(candidate_name("John Smith at Acme | LinkedIn"), "John Smith");
        assert_eq!(candidate_name("Ana | Lopez, PhD"), "Ana Lopez PhD");
        assert_eq!(candidate_name(""), "");
    }

    #[test]
    fn test_message_layout() {
        let config = OutreachConfig {
            sender_name: "Sam".to_string(),
            intro: Some("Custom intro.".to_string()),
        };
        let drafted = draft_messages(&[profile("Jane Doe - SWE", "Acme")], &config);

        let lines: Vec<&str> = drafted[0].message.lines().collect();
        assert_eq!(lines[0], "Hi Jane Doe,");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Custom intro.");
        assert!(lines[3].starts_with("I came across your profile while researching opportunities at Acme and"));
        assert_eq!(lines.last(), Some(&"Sam"));
    }

    #[test]
    fn test_unknown_name_and_company() {
        let config = OutreachConfig::default();
        let drafted = draft_messages(&[profile("", "")], &config);

        assert!(drafted[0].message.starts_with("Hi there,\n\n"));
        assert!(drafted[0]
            .message
            .contains("researching opportunities and would love"));
        assert!(drafted[0].message.contains(INTRO_PARAGRAPH));
    }
}
