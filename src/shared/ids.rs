//! Human-readable identifiers derived from display names.
//!
//! An identifier is the slugified name followed by the creation second, e.g.
//! `call_analysis_20250314093015` for a category or
//! `churn-model-20250314093015` for a work. Uniqueness only holds at one-second
//! granularity; the store's primary key rejects same-second duplicates.

use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::shared::constants::ID_TIMESTAMP_FORMAT;
use crate::shared::validation::{SLUG_STRIP_REGEX, WHITESPACE_REGEX};

/// Separator placed between words and before the timestamp suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSeparator {
    /// `_`, used for category ids
    Underscore,
    /// `-`, used for work ids
    Hyphen,
}

impl IdSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdSeparator::Underscore => "_",
            IdSeparator::Hyphen => "-",
        }
    }
}

/// Lowercase, drop characters outside `[a-z0-9\s-]` and join words with the separator
pub fn slugify(name: &str, separator: IdSeparator) -> String {
    let lowered = name.to_lowercase();
    let stripped = SLUG_STRIP_REGEX.replace_all(&lowered, "");
    WHITESPACE_REGEX
        .replace_all(stripped.trim(), separator.as_str())
        .into_owned()
}

/// Build an identifier for `name` stamped with `at`
pub fn generate_id_at(name: &str, separator: IdSeparator, at: DateTime<Utc>) -> Result<String> {
    let slug = slugify(name, separator);
    if slug.is_empty() {
        return Err(AppError::Validation(format!(
            "Name '{}' must contain at least one letter or digit",
            name
        )));
    }

    Ok(format!(
        "{}{}{}",
        slug,
        separator.as_str(),
        at.format(ID_TIMESTAMP_FORMAT)
    ))
}

pub fn generate_category_id(name: &str) -> Result<String> {
    generate_id_at(name, IdSeparator::Underscore, Utc::now())
}

pub fn generate_work_id(name: &str) -> Result<String> {
    generate_id_at(name, IdSeparator::Hyphen, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fake::faker::company::en::CompanyName;
    use fake::faker::lorem::en::Words;
    use fake::Fake;

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 15).unwrap()
    }

    fn assert_well_formed(id: &str, separator: IdSeparator) {
        let (slug, suffix) = id.split_at(id.len() - 14);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()), "suffix of {id}");
        assert!(slug.ends_with(separator.as_str()), "separator in {id}");
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'),
            "charset of {id}"
        );
    }

    #[test]
    fn test_category_id_format() {
        let id = generate_id_at("Call Analysis", IdSeparator::Underscore, fixed_instant()).unwrap();
        assert_eq!(id, "call_analysis_20250314093015");
    }

    #[test]
    fn test_work_id_format() {
        let id = generate_id_at("Churn  Model v2", IdSeparator::Hyphen, fixed_instant()).unwrap();
        assert_eq!(id, "churn-model-v2-20250314093015");
    }

    #[test]
    fn test_slugify_strips_punctuation_and_accents() {
        assert_eq!(
            slugify("  Análisis de Llamadas (B2B)! ", IdSeparator::Underscore),
            "anlisis_de_llamadas_b2b"
        );
        assert_eq!(slugify("pre-sales\tfunnel", IdSeparator::Hyphen), "pre-sales-funnel");
    }

    #[test]
    fn test_name_without_letters_or_digits_is_rejected() {
        let result = generate_id_at("!!! 📞 ???", IdSeparator::Underscore, fixed_instant());
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = generate_id_at("   ", IdSeparator::Hyphen, fixed_instant());
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_generated_names_produce_well_formed_ids() {
        for _ in 0..50 {
            let company: String = CompanyName().fake();
            let words: Vec<String> = Words(1..4).fake();
            let name = format!("{} {}", company, words.join(" "));

            for separator in [IdSeparator::Underscore, IdSeparator::Hyphen] {
                let id = generate_id_at(&name, separator, fixed_instant()).unwrap();
                assert_well_formed(&id, separator);
            }
        }
    }

    #[test]
    fn test_ids_differ_across_seconds() {
        let first = generate_id_at("Call Analysis", IdSeparator::Hyphen, fixed_instant()).unwrap();
        let second = generate_id_at(
            "Call Analysis",
            IdSeparator::Hyphen,
            fixed_instant() + Duration::seconds(1),
        )
        .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_ids_collide_within_the_same_second() {
        let at = fixed_instant();
        let first = generate_id_at("Call Analysis", IdSeparator::Hyphen, at).unwrap();
        let second = generate_id_at(
            "Call Analysis",
            IdSeparator::Hyphen,
            at + Duration::milliseconds(400),
        )
        .unwrap();
        assert_eq!(first, second);
    }
}
