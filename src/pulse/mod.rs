//! Market pulse: synthetic trend annotation, mood aggregation, sorting and
//! the rotating news ticker.
//!
//! Trend values are decorative. They are resampled on every load and must
//! never be treated as a real price feed; no caller may assume stability
//! across two calls.

use crate::models::{Listing, Mood, PulseRow, SortDirection, SortKey, SortSpec, Trend};
use chrono::{DateTime, FixedOffset, Utc};
use rand::RngExt;
use std::cmp::Ordering;

/// Attach a synthetic change percentage in [-3.0, 3.0] (one decimal place)
/// to every listing, plus the supplier column shown in the pulse table.
pub fn annotate(listings: Vec<Listing>) -> Vec<PulseRow> {
    let mut rng = rand::rng();

    listings
        .into_iter()
        .map(|listing| {
            let change_pct = (rng.random_range(-3.0..=3.0) * 10.0_f64).round() / 10.0;
            PulseRow {
                supplier: format!("{} • Verified", listing.stock),
                trend: Trend::from_change(change_pct),
                listing,
            }
        })
        .collect()
}

/// Aggregate sentiment: strictly positive changes count up, strictly
/// negative count down, ties count for neither.
pub fn mood(rows: &[PulseRow]) -> Mood {
    let up = rows.iter().filter(|r| r.trend.change_pct > 0.0).count();
    let down = rows.iter().filter(|r| r.trend.change_pct < 0.0).count();

    if up + down == 0 {
        return Mood::Unavailable;
    }

    let up_pct = ((up as f64 / (up + down) as f64) * 100.0).round() as u32;
    Mood::Split {
        up_pct,
        down_pct: 100 - up_pct,
    }
}

/// Stable in-place sort. String keys compare case-insensitively, numeric
/// keys numerically; unparsed prices sort after real ones.
pub fn sort_rows(rows: &mut [PulseRow], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ord = match spec.key {
            SortKey::Product => cmp_ci(&a.listing.name, &b.listing.name),
            SortKey::Origin => cmp_ci(&a.listing.origin, &b.listing.origin),
            SortKey::Price => cmp_opt_f64(a.listing.price.raw, b.listing.price.raw),
            SortKey::Change => cmp_f64(a.trend.change_pct, b.trend.change_pct),
        };
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp_f64(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ── News ticker ───────────────────────────────────────────────────────────────

/// One ticker line with the active headline bracketed. The caller owns the
/// rotation index.
pub fn ticker_line(feed: &[String], index: usize) -> String {
    if feed.is_empty() {
        return String::new();
    }
    let active = index % feed.len();
    feed.iter()
        .enumerate()
        .map(|(i, headline)| {
            if i == active {
                format!("[{}]", headline)
            } else {
                headline.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" • ")
}

/// Next rotation index, wrapping at the end of the feed.
pub fn advance_ticker(feed_len: usize, index: usize) -> usize {
    if feed_len == 0 { 0 } else { (index + 1) % feed_len }
}

// ── Timestamp ─────────────────────────────────────────────────────────────────

const GST_OFFSET_SECS: i32 = 4 * 3600;

/// Render a UTC instant as a Gulf Standard Time (UTC+4) stamp.
pub fn last_updated_stamp(now: DateTime<Utc>) -> String {
    let gst = FixedOffset::east_opt(GST_OFFSET_SECS).expect("UTC+4 is in range");
    format!("{} GST", now.with_timezone(&gst).format("%d %b %Y, %H:%M"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalizer::normalize;
    use crate::models::RawListing;
    use chrono::TimeZone;

    fn sample_listings(n: usize) -> Vec<Listing> {
        let rows: Vec<RawListing> = (0..n)
            .map(|i| RawListing {
                name: Some(format!("Grain {}", i)),
                stock: Some(format!("{} bags", i * 10)),
                ..Default::default()
            })
            .collect();
        normalize(&rows).0
    }

    fn rows_with_changes(changes: &[f64]) -> Vec<PulseRow> {
        sample_listings(changes.len())
            .into_iter()
            .zip(changes)
            .map(|(listing, &c)| PulseRow {
                supplier: format!("{} • Verified", listing.stock),
                trend: Trend::from_change(c),
                listing,
            })
            .collect()
    }

    #[test]
    fn test_annotate_range_and_resolution() {
        let rows = annotate(sample_listings(200));
        assert_eq!(rows.len(), 200);

        for row in &rows {
            let c = row.trend.change_pct;
            assert!((-3.0..=3.0).contains(&c), "change out of range: {}", c);
            // one decimal place
            assert!(((c * 10.0).round() - c * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_annotate_direction_matches_sign() {
        use crate::models::TrendDirection;
        for row in annotate(sample_listings(50)) {
            match row.trend.direction {
                TrendDirection::Up => assert!(row.trend.change_pct >= 0.0),
                TrendDirection::Down => assert!(row.trend.change_pct < 0.0),
            }
        }
    }

    #[test]
    fn test_annotate_builds_supplier_column() {
        let rows = annotate(sample_listings(2));
        assert_eq!(rows[1].supplier, "10 bags • Verified");
    }

    #[test]
    fn test_mood_excludes_ties_from_denominator() {
        let rows = rows_with_changes(&[1.0, -1.0, 2.0, -2.0, 3.0, 0.0]);
        assert_eq!(mood(&rows), Mood::Split { up_pct: 60, down_pct: 40 });
        assert_eq!(mood(&rows).to_string(), "60% Up • 40% Down");
    }

    #[test]
    fn test_mood_unavailable_when_all_flat() {
        assert_eq!(mood(&rows_with_changes(&[0.0, 0.0])), Mood::Unavailable);
        assert_eq!(mood(&[]), Mood::Unavailable);
    }

    #[test]
    fn test_sort_rows_toggle_reverses_only_order() {
        let mut rows = rows_with_changes(&[1.0, 2.0, 3.0]);
        rows[0].listing.origin = "india".to_string();
        rows[1].listing.origin = "Thailand".to_string();
        rows[2].listing.origin = "Pakistan".to_string();
        let before = rows.clone();

        let asc = SortSpec::toggle(None, SortKey::Origin);
        sort_rows(&mut rows, asc);
        let origins: Vec<&str> = rows.iter().map(|r| r.listing.origin.as_str()).collect();
        assert_eq!(origins, vec!["india", "Pakistan", "Thailand"]);

        let desc = SortSpec::toggle(Some(asc), SortKey::Origin);
        sort_rows(&mut rows, desc);
        let origins: Vec<&str> = rows.iter().map(|r| r.listing.origin.as_str()).collect();
        assert_eq!(origins, vec!["Thailand", "Pakistan", "india"]);

        // every row survives untouched apart from position
        for row in &before {
            assert!(rows.contains(row));
        }
    }

    #[test]
    fn test_sort_rows_by_change_numeric() {
        let mut rows = rows_with_changes(&[2.5, -1.0, 0.3]);
        sort_rows(
            &mut rows,
            SortSpec {
                key: SortKey::Change,
                direction: SortDirection::Ascending,
            },
        );
        let changes: Vec<f64> = rows.iter().map(|r| r.trend.change_pct).collect();
        assert_eq!(changes, vec![-1.0, 0.3, 2.5]);
    }

    #[test]
    fn test_ticker_rotation() {
        let feed: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();

        assert_eq!(ticker_line(&feed, 0), "[a] • b • c");
        assert_eq!(ticker_line(&feed, 1), "a • [b] • c");

        let mut index = 2;
        index = advance_ticker(feed.len(), index);
        assert_eq!(index, 0);

        assert_eq!(ticker_line(&[], 5), "");
        assert_eq!(advance_ticker(0, 5), 0);
    }

    #[test]
    fn test_last_updated_stamp_is_gst() {
        let utc = Utc.with_ymd_and_hms(2026, 2, 20, 20, 30, 0).unwrap();
        assert_eq!(last_updated_stamp(utc), "21 Feb 2026, 00:30 GST");
    }
}
