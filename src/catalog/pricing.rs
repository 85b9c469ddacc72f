//! Price string parsing and per-kilogram derivation.
//!
//! Two currency regimes: bulk bookings carry a "USD" marker and are shown
//! per metric ton with no kilogram breakdown; everything else is an AED
//! bagged-goods price with a derived AED/kg figure when the package size
//! is usable.

use crate::models::Price;

/// Parse a raw price string and optional package size into display and
/// numeric forms. Never fails: unparsable input degrades to the original
/// string with `raw = None`.
pub fn compute(price: Option<&str>, size: Option<&str>) -> Price {
    let size_kg = size.and_then(parse_size);

    let Some(raw_price) = price else {
        return Price {
            display: String::new(),
            raw: None,
            size_kg,
            per_kg: None,
        };
    };

    let amount = parse_amount(raw_price);

    // "USD" anywhere routes to the booking path: per-MT display, no per-kg.
    if raw_price.to_uppercase().contains("USD") {
        let display = match amount {
            Some(a) => format!("{} USD / MT", fmt_amount(a)),
            None => raw_price.to_string(),
        };
        return Price {
            display,
            raw: amount,
            size_kg,
            per_kg: None,
        };
    }

    match amount {
        None => Price {
            display: raw_price.to_string(),
            raw: None,
            size_kg,
            per_kg: None,
        },
        Some(a) => {
            let per_kg = size_kg
                .filter(|kg| *kg > 0)
                .map(|kg| round2(a / f64::from(kg)));

            let display = match per_kg {
                Some(p) => format!("{} • {:.2} AED/kg", raw_price.trim(), p),
                None => raw_price.trim().to_string(),
            };

            Price {
                display,
                raw: Some(a),
                size_kg,
                per_kg,
            }
        }
    }
}

/// Numeric amount left once the known currency tokens are removed.
/// "AED 1,234.56" → 1234.56 | "920 USD / MT" → 920.0 | "TBD" → None
fn parse_amount(s: &str) -> Option<f64> {
    let mut body = s.to_lowercase();
    for token in ["aed", "usd", "mt", "/", ","] {
        body = body.replace(token, "");
    }
    body.trim().parse().ok()
}

/// Integer kilogram count from the leading digits, if any.
/// "50" → 50 | "25 kg" → 25 | "bulk" → None
fn parse_size(s: &str) -> Option<u32> {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Whole amounts print without a decimal tail: 920 → "920", 605.5 → "605.50"
fn fmt_amount(a: f64) -> String {
    if a.fract() == 0.0 {
        format!("{}", a as i64)
    } else {
        format!("{:.2}", a)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_price_with_size() {
        let price = compute(Some("AED 100"), Some("50"));
        assert_eq!(price.raw, Some(100.0));
        assert_eq!(price.size_kg, Some(50));
        assert_eq!(price.per_kg, Some(2.0));
        assert_eq!(price.display, "AED 100 • 2.00 AED/kg");
    }

    #[test]
    fn test_local_price_rounds_to_two_decimals() {
        let price = compute(Some("AED 100"), Some("3"));
        assert_eq!(price.per_kg, Some(33.33));
        assert_eq!(price.display, "AED 100 • 33.33 AED/kg");
    }

    #[test]
    fn test_usd_marker_never_yields_per_kg() {
        for raw in ["920 USD", "USD 920", "usd 920", "920 Usd / MT"] {
            let price = compute(Some(raw), Some("50"));
            assert_eq!(price.per_kg, None, "per-kg leaked for {:?}", raw);
            assert!(price.display.contains("USD / MT"), "display: {}", price.display);
        }
    }

    #[test]
    fn test_booking_display_format() {
        let price = compute(Some("920 USD"), None);
        assert_eq!(price.display, "920 USD / MT");
        assert_eq!(price.raw, Some(920.0));
    }

    #[test]
    fn test_zero_or_missing_size_omits_per_kg() {
        let zero = compute(Some("AED 85"), Some("0"));
        assert_eq!(zero.per_kg, None);
        assert_eq!(zero.display, "AED 85");

        let missing = compute(Some("AED 85"), None);
        assert_eq!(missing.per_kg, None);
        assert_eq!(missing.display, "AED 85");

        let garbage = compute(Some("AED 85"), Some("a few bags"));
        assert_eq!(garbage.per_kg, None);
    }

    #[test]
    fn test_unparsable_price_keeps_raw_string() {
        let price = compute(Some("TBD"), Some("50"));
        assert_eq!(price.raw, None);
        assert_eq!(price.per_kg, None);
        assert_eq!(price.display, "TBD");
    }

    #[test]
    fn test_missing_price_is_empty_not_zero() {
        let price = compute(None, Some("50"));
        assert_eq!(price.raw, None);
        assert_eq!(price.display, "");
    }

    #[test]
    fn test_thousands_separators() {
        let price = compute(Some("AED 1,250"), Some("25"));
        assert_eq!(price.raw, Some(1250.0));
        assert_eq!(price.per_kg, Some(50.0));
    }
}
