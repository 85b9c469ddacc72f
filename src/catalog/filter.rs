//! Sparse AND-combined listing filters.
//!
//! Pure function of (records, spec): stable, input-order-preserving, and an
//! empty result is a valid outcome for the caller to render.

use crate::models::{FilterSpec, Listing};

/// Keep the listings for which every provided predicate holds.
pub fn apply(listings: &[Listing], spec: &FilterSpec) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| matches(l, spec))
        .cloned()
        .collect()
}

/// True when the listing satisfies every predicate present in the spec.
pub fn matches(listing: &Listing, spec: &FilterSpec) -> bool {
    if let Some(origin) = &spec.origin {
        if listing.origin.to_lowercase() != origin.to_lowercase() {
            return false;
        }
    }

    if let Some(grade) = &spec.grade {
        if !listing.badge.to_lowercase().contains(&grade.to_lowercase()) {
            return false;
        }
    }

    if let Some(text) = &spec.free_text {
        if !listing.name.to_lowercase().contains(&text.to_lowercase()) {
            return false;
        }
    }

    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalizer::normalize;
    use crate::models::RawListing;

    fn listings() -> Vec<Listing> {
        let rows = vec![
            RawListing {
                name: Some("1121 Sella".to_string()),
                origin: Some("India".to_string()),
                badge: Some("Premium".to_string()),
                ..Default::default()
            },
            RawListing {
                name: Some("Thai White 5%".to_string()),
                origin: Some("Thailand".to_string()),
                badge: Some("Grade A".to_string()),
                ..Default::default()
            },
            RawListing {
                name: Some("Golden Sella".to_string()),
                origin: Some("India".to_string()),
                badge: Some("".to_string()),
                ..Default::default()
            },
        ];
        normalize(&rows).0
    }

    #[test]
    fn test_empty_spec_is_identity() {
        let all = listings();
        let filtered = apply(&all, &FilterSpec::default());
        assert_eq!(filtered, all);
    }

    #[test]
    fn test_origin_exact_case_insensitive() {
        let all = listings();
        let filtered = apply(
            &all,
            &FilterSpec {
                origin: Some("india".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|l| l.origin == "India"));
        // input order preserved
        assert_eq!(filtered[0].name, "1121 Sella");
        assert_eq!(filtered[1].name, "Golden Sella");
    }

    #[test]
    fn test_grade_substring() {
        let all = listings();
        let filtered = apply(
            &all,
            &FilterSpec {
                grade: Some("prem".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "1121 Sella");
    }

    #[test]
    fn test_free_text_substring() {
        let all = listings();
        let filtered = apply(
            &all,
            &FilterSpec {
                free_text: Some("sella".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_sequential_equals_combined() {
        let all = listings();

        let origin_only = FilterSpec {
            origin: Some("India".to_string()),
            ..Default::default()
        };
        let text_only = FilterSpec {
            free_text: Some("golden".to_string()),
            ..Default::default()
        };
        let combined = FilterSpec {
            origin: Some("India".to_string()),
            free_text: Some("golden".to_string()),
            ..Default::default()
        };

        let sequential = apply(&apply(&all, &origin_only), &text_only);
        assert_eq!(sequential, apply(&all, &combined));
    }

    #[test]
    fn test_empty_result_is_valid() {
        let all = listings();
        let filtered = apply(
            &all,
            &FilterSpec {
                origin: Some("Vietnam".to_string()),
                ..Default::default()
            },
        );
        assert!(filtered.is_empty());
    }
}
