// src/extraction/company_resolver.rs
//! Company name derived strictly from the posting URL, never from page text.

use crate::utils::{collapse_whitespace, title_case};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

const GENERIC_SUBDOMAINS: [&str; 5] = ["www", "jobs", "careers", "app", "boards"];
const REJECTED_SECOND_LEVEL: [&str; 4] = ["co", "com", "net", "org"];

static VERSION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{1,2}\d+$").expect("valid version label regex"));

/// Where the company slug lives for a given platform
#[derive(Debug, Clone, Copy)]
enum SlugRule {
    /// `<company>.wdN.<suffix>`: strip the suffix, drop generic and version labels
    VersionedSubdomain { suffix: &'static str },
    /// `<company>.<suffix>`: drop generic labels, take the right-most one
    Subdomain { suffix: &'static str },
    /// `<host>/<company>/...`
    FirstPathSegment,
}

struct HostRule {
    suffixes: &'static [&'static str],
    rule: SlugRule,
}

static HOST_RULES: &[HostRule] = &[
    HostRule {
        suffixes: &["myworkdayjobs.com"],
        rule: SlugRule::VersionedSubdomain {
            suffix: "myworkdayjobs.com",
        },
    },
    HostRule {
        suffixes: &["workable.com"],
        rule: SlugRule::Subdomain {
            suffix: "workable.com",
        },
    },
    HostRule {
        suffixes: &["recruitee.com"],
        rule: SlugRule::Subdomain {
            suffix: "recruitee.com",
        },
    },
    HostRule {
        suffixes: &["bamboohr.com"],
        rule: SlugRule::Subdomain {
            suffix: "bamboohr.com",
        },
    },
    HostRule {
        suffixes: &["teamtailor.com"],
        rule: SlugRule::Subdomain {
            suffix: "teamtailor.com",
        },
    },
    HostRule {
        suffixes: &["greenhouse.io", "lever.co", "ashbyhq.com", "smartrecruiters.com"],
        rule: SlugRule::FirstPathSegment,
    },
];

/// Best-effort company name for a job URL, or an empty string.
pub fn resolve_company(url: &str) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return String::new();
    };
    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    let path = parsed.path().trim_matches('/');

    HOST_RULES
        .iter()
        .filter(|entry| entry.suffixes.iter().any(|s| host.ends_with(s)))
        .find_map(|entry| apply_rule(entry.rule, &host, path))
        .or_else(|| second_level_label(&host))
        .map(|slug| normalize_slug(&slug))
        .unwrap_or_default()
}

fn apply_rule(rule: SlugRule, host: &str, path: &str) -> Option<String> {
    match rule {
        SlugRule::VersionedSubdomain { suffix } => subdomain_labels(host, suffix)
            .into_iter()
            .filter(|label| !VERSION_LABEL.is_match(label))
            .last(),
        SlugRule::Subdomain { suffix } => subdomain_labels(host, suffix).into_iter().last(),
        SlugRule::FirstPathSegment => path
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    }
}

/// Labels left of `suffix`, minus the generic ones
fn subdomain_labels(host: &str, suffix: &str) -> Vec<String> {
    let prefix = host.strip_suffix(suffix).unwrap_or(host);
    prefix
        .split('.')
        .filter(|label| !label.is_empty() && !GENERIC_SUBDOMAINS.contains(label))
        .map(str::to_string)
        .collect()
}

fn second_level_label(host: &str) -> Option<String> {
    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() < 2 {
        return None;
    }

    let candidate = parts[parts.len() - 2];
    if candidate.is_empty() || REJECTED_SECOND_LEVEL.contains(&candidate) {
        return None;
    }
    Some(candidate.to_string())
}

fn normalize_slug(slug: &str) -> String {
    let spaced = slug.replace(['-', '_'], " ");
    title_case(&collapse_whitespace(&spaced))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workday_versioned_subdomain() {
        assert_eq!(
            resolve_company(
                "https://sunlife.wd3.myworkdayjobs.com/en-US/Campus/job/Toronto-Ontario/Student_JR00114373"
            ),
            "Sunlife"
        );
        assert_eq!(
            resolve_company("https://big-bank.wd12.myworkdayjobs.com/External"),
            "Big Bank"
        );
    }

    #[test]
    fn test_path_per_tenant_platforms() {
        assert_eq!(resolve_company("https://boards.greenhouse.io/acme/jobs/123"), "Acme");
        assert_eq!(resolve_company("https://jobs.lever.co/initech/abcde"), "Initech");
        assert_eq!(
            resolve_company("https://jobs.ashbyhq.com/globex_corp/1234"),
            "Globex Corp"
        );
        assert_eq!(
            resolve_company("https://careers.smartrecruiters.com/Umbrella-Inc/744"),
            "Umbrella Inc"
        );
    }

    #[test]
    fn test_subdomain_per_tenant_platforms() {
        assert_eq!(resolve_company("https://hooli.bamboohr.com/careers/42"), "Hooli");
        assert_eq!(
            resolve_company("https://jobs.pied-piper.teamtailor.com/jobs/1"),
            "Pied Piper"
        );
        assert_eq!(resolve_company("https://massive.recruitee.com/o/dev"), "Massive");
    }

    #[test]
    fn test_second_level_fallback() {
        assert_eq!(resolve_company("https://careers.stripe.com/jobs/123"), "Stripe");
        assert_eq!(resolve_company("https://www.shopify.ca/careers"), "Shopify");
    }

    #[test]
    fn test_greenhouse_without_path_falls_back() {
        assert_eq!(resolve_company("https://boards.greenhouse.io/"), "Greenhouse");
    }

    #[test]
    fn test_rejected_and_invalid_urls() {
        assert_eq!(resolve_company("https://example.co.uk/jobs"), "");
        assert_eq!(resolve_company("not a url"), "");
        assert_eq!(resolve_company(""), "");
        assert_eq!(resolve_company("https://localhost/jobs"), "");
    }
}
