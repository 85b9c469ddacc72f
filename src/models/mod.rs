use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Raw listing ───────────────────────────────────────────────────────────────

/// One record as it arrives from stock.json or the hosted product collection.
/// Field names and scalar types differ between the two sources, so everything
/// is optional here and resolved by the normalizer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default, deserialize_with = "flex_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "flex_string")]
    pub origin: Option<String>,

    #[serde(default, deserialize_with = "flex_string")]
    pub packaging: Option<String>,

    #[serde(default, deserialize_with = "flex_string")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "flex_string")]
    pub size: Option<String>,

    // "stock" in stock.json, "available" in the document collection
    #[serde(default, alias = "available", deserialize_with = "flex_string")]
    pub stock: Option<String>,

    #[serde(default, deserialize_with = "flex_string")]
    pub badge: Option<String>,

    #[serde(default, alias = "imageName", deserialize_with = "flex_string")]
    pub img: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Accept strings or bare numbers for fields the sources are inconsistent
/// about (`"size": "50"` vs `"size": 50`).
fn flex_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

// ── Canonical listing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub name: String,
    pub origin: String,
    pub packaging: String,
    pub price: Price,
    pub stock: String,
    pub badge: String,
    pub image_ref: String,
    pub keywords: Vec<String>,
}

/// Parsed price information. `raw` is `None` when the price body could not
/// be parsed, which is distinct from a real zero price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Price {
    pub display: String,
    pub raw: Option<f64>,
    pub size_kg: Option<u32>,
    pub per_kg: Option<f64>,
}

// ── Pulse view ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Up => write!(f, "up"),
            TrendDirection::Down => write!(f, "down"),
        }
    }
}

/// Synthetic, regenerated on every load. Never persisted and never derived
/// from real history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub change_pct: f64,
    pub direction: TrendDirection,
}

impl Trend {
    pub fn from_change(change_pct: f64) -> Self {
        let direction = if change_pct >= 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        };
        Self { change_pct, direction }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseRow {
    pub listing: Listing,
    pub trend: Trend,
    pub supplier: String,
}

/// Aggregate up/down sentiment over one load. Ties are excluded from both
/// counts, so an all-flat table reports `Unavailable` instead of 0%/0%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    Split { up_pct: u32, down_pct: u32 },
    Unavailable,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Split { up_pct, down_pct } => {
                write!(f, "{}% Up • {}% Down", up_pct, down_pct)
            }
            Mood::Unavailable => write!(f, "unavailable"),
        }
    }
}

// ── Filtering ─────────────────────────────────────────────────────────────────

/// Sparse filter: absent keys impose no constraint, provided keys are
/// AND-combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub origin: Option<String>,
    pub grade: Option<String>,
    pub free_text: Option<String>,
}

// ── Sorting ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Product,
    Origin,
    Price,
    Change,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" | "name" => Ok(SortKey::Product),
            "origin" => Ok(SortKey::Origin),
            "price" => Ok(SortKey::Price),
            "change" | "trend" => Ok(SortKey::Change),
            other => Err(format!(
                "unknown sort key '{}' (expected product, origin, price or change)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The only mutable view state in the pulse table, passed explicitly into
/// rendering rather than held globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Requesting a sort on the key already in effect flips the direction;
    /// a new key starts ascending.
    pub fn toggle(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec {
                key,
                direction: SortDirection::Ascending,
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
