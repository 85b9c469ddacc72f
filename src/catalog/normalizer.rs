//! Raw record → canonical listing conversion.
//!
//! Output always preserves the length and order of the input. Records with
//! defects are repaired with defaults and reported, never dropped.

use crate::catalog::pricing;
use crate::models::{Listing, RawListing};
use std::fmt;

/// Appended to the name slug when no explicit image field is present.
pub const IMAGE_EXT: &str = ".jpg";

/// Non-fatal data-quality problem found while normalizing. The affected
/// record is still emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataIssue {
    MissingName { index: usize },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::MissingName { index } => {
                write!(f, "listing {} has no name", index)
            }
        }
    }
}

/// Convert raw rows into canonical listings, same length and order.
pub fn normalize(rows: &[RawListing]) -> (Vec<Listing>, Vec<DataIssue>) {
    let mut issues = Vec::new();

    let listings = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let name = row.name.as_deref().unwrap_or("").trim().to_string();
            if name.is_empty() {
                issues.push(DataIssue::MissingName { index });
            }

            Listing {
                origin: row.origin.clone().unwrap_or_default(),
                packaging: row
                    .packaging
                    .clone()
                    .or_else(|| row.size.clone())
                    .unwrap_or_default(),
                price: pricing::compute(row.price.as_deref(), row.size.as_deref()),
                stock: row.stock.clone().unwrap_or_default(),
                badge: row.badge.clone().unwrap_or_default(),
                image_ref: row
                    .img
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", slug(&name), IMAGE_EXT)),
                keywords: row.keywords.clone(),
                name,
            }
        })
        .collect();

    (listings, issues)
}

/// Derive a filesystem-safe image stem from a product name: lowercase,
/// whitespace runs become a single hyphen, everything outside `[a-z0-9-]`
/// is stripped. Total and idempotent.
pub fn slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if c.is_ascii_alphanumeric() || c == '-' {
                out.push(c);
            }
        }
    }

    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
