// src/extraction/merger.rs
use super::{CandidateRecord, FallbackFields, JobRecord};
use crate::utils::city_only;

/// Whether the model left a field the HTML fallback can fill
pub fn needs_fallback(candidate: &CandidateRecord) -> bool {
    candidate.title.is_empty() || candidate.location.is_empty()
}

/// Build the final record. The resolver owns `company`; the model wins `title` and
/// `location` when it supplied them; the remaining fields come from the model alone.
pub fn merge_records(
    candidate: CandidateRecord,
    fallback: Option<FallbackFields>,
    resolved_company: String,
) -> JobRecord {
    let fallback = fallback.unwrap_or_default();

    let title = if candidate.title.is_empty() {
        fallback.title
    } else {
        candidate.title
    };

    let location = if candidate.location.is_empty() {
        fallback.location
    } else {
        candidate.location
    };

    JobRecord {
        title,
        location: city_only(&location),
        company: resolved_company,
        salary_range: candidate.salary_range,
        hiring_manager: candidate.hiring_manager,
        department: candidate.department,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, location: &str) -> CandidateRecord {
        CandidateRecord {
            title: title.to_string(),
            location: location.to_string(),
            company: "Model Corp".to_string(),
            salary_range: "$100k - $120k".to_string(),
            hiring_manager: "Jane Doe".to_string(),
            department: "Engineering".to_string(),
        }
    }

    fn fallback() -> FallbackFields {
        FallbackFields {
            title: "Fallback Title".to_string(),
            location: "Fallback City".to_string(),
        }
    }

    #[test]
    fn test_model_values_take_precedence() {
        let record = merge_records(candidate("SWE", "Toronto"), Some(fallback()), "Acme".into());

        assert_eq!(record.title, "SWE");
        assert_eq!(record.location, "Toronto");
        assert_eq!(record.company, "Acme");
        assert_eq!(record.salary_range, "$100k - $120k");
        assert_eq!(record.hiring_manager, "Jane Doe");
        assert_eq!(record.department, "Engineering");
    }

    #[test]
    fn test_empty_model_fields_are_backfilled() {
        let record = merge_records(candidate("", ""), Some(fallback()), String::new());

        assert_eq!(record.title, "Fallback Title");
        assert_eq!(record.location, "Fallback City");
        assert_eq!(record.company, "");
    }

    #[test]
    fn test_no_fallback_leaves_fields_empty() {
        let record = merge_records(CandidateRecord::default(), None, "Acme".into());
        assert_eq!(
            record,
            JobRecord {
                company: "Acme".to_string(),
                ..JobRecord::default()
            }
        );
    }

    #[test]
    fn test_model_location_keeps_city_only() {
        let record = merge_records(candidate("SWE", "Toronto, ON"), None, "Acme".into());
        assert_eq!(record.location, "Toronto");
    }

    #[test]
    fn test_needs_fallback() {
        assert!(!needs_fallback(&candidate("SWE", "Toronto")));
        assert!(needs_fallback(&candidate("", "Toronto")));
        assert!(needs_fallback(&candidate("SWE", "")));
    }
}
