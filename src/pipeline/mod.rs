//! Pipeline orchestrator: ties source → normalizer → views together.
//!
//! Control flow per load: raw records → normalize → (trend annotation,
//! pulse only) → filter → view. Every successful load rebuilds the whole
//! listing set; nothing is carried over between refreshes.

use crate::catalog::{filter, normalizer};
use crate::config::AppConfig;
use crate::models::{FilterSpec, Listing, Mood, PulseRow, SortSpec};
use crate::pulse;
use crate::source::{self, StockSource};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

pub struct Pipeline {
    config: AppConfig,
    source: Box<dyn StockSource>,
}

/// One fully normalized load of the stock document.
pub struct Catalog {
    pub listings: Vec<Listing>,
    pub issues: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopView {
    pub listings: Vec<Listing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PulseView {
    pub rows: Vec<PulseRow>,
    pub mood: Mood,
    pub ticker: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewView {
    pub listings: Vec<Listing>,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Result<Self> {
        let source = source::from_config(&config.source)
            .context("Failed to build stock source")?;
        Ok(Self { config, source })
    }

    /// Fetch and normalize the full listing set, replacing any prior set.
    pub async fn load(&self) -> Result<Catalog> {
        let rows = self
            .source
            .fetch_listings()
            .await
            .context("Stock fetch failed")?;

        let (listings, issues) = normalizer::normalize(&rows);
        for issue in &issues {
            warn!("{}", issue);
        }

        let catalog = Catalog {
            listings,
            issues: issues.len(),
        };
        info!(
            "{} listings loaded ({} data issues)",
            catalog.listings.len(),
            catalog.issues
        );
        Ok(catalog)
    }

    pub async fn shop_view(&self, spec: &FilterSpec) -> Result<ShopView> {
        let catalog = self.load().await?;
        Ok(ShopView {
            listings: filter::apply(&catalog.listings, spec),
        })
    }

    pub async fn pulse_view(
        &self,
        spec: &FilterSpec,
        sort: Option<SortSpec>,
        ticker_index: usize,
    ) -> Result<PulseView> {
        let catalog = self.load().await?;

        let mut rows: Vec<PulseRow> = pulse::annotate(catalog.listings)
            .into_iter()
            .filter(|row| filter::matches(&row.listing, spec))
            .collect();

        if let Some(sort_spec) = sort {
            pulse::sort_rows(&mut rows, sort_spec);
        }

        Ok(PulseView {
            mood: pulse::mood(&rows),
            ticker: pulse::ticker_line(&self.config.pulse.news_feed, ticker_index),
            last_updated: pulse::last_updated_stamp(Utc::now()),
            rows,
        })
    }

    /// First few listings for the homepage preview.
    pub async fn preview_view(&self) -> Result<PreviewView> {
        let catalog = self.load().await?;
        let limit = self.config.pulse.preview_limit;
        Ok(PreviewView {
            listings: catalog.listings.into_iter().take(limit).collect(),
        })
    }

    pub fn source(&self) -> &dyn StockSource {
        self.source.as_ref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
