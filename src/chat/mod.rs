//! Alliya, the keyword-matching availability assistant.
//!
//! Query resolution is tiered: a keyword-containment query against the
//! source first, then a local fuzzy scan over the full set, then the remote
//! fallback endpoint, and finally a generic availability reply. A failure
//! in any tier logs a warning and falls through to the next one; asking
//! never errors.

use crate::catalog::normalizer;
use crate::config::ChatConfig;
use crate::links;
use crate::models::Listing;
use crate::source::{SourceError, StockSource};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Keyword,
    FuzzyScan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// A listing matched one of the local tiers.
    Match {
        tier: MatchTier,
        name: String,
        price: String,
        stock: String,
        link: String,
    },
    /// The remote fallback endpoint answered.
    Remote { reply: String },
    /// Nothing matched anywhere. Claims availability for whatever was
    /// asked, as the site does.
    Generic { query: String, link: String },
}

#[derive(Debug, Deserialize)]
struct FallbackPayload {
    reply: Option<String>,
}

pub struct AlliyaEngine<'a> {
    source: &'a dyn StockSource,
    config: &'a ChatConfig,
    http: reqwest::Client,
}

impl<'a> AlliyaEngine<'a> {
    pub fn new(source: &'a dyn StockSource, config: &'a ChatConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { source, config, http })
    }

    pub async fn ask(&self, raw_query: &str) -> ChatReply {
        let query = raw_query.trim().to_lowercase();
        let terms: Vec<String> = query.split_whitespace().map(str::to_string).collect();

        if !terms.is_empty() {
            // 1. Keyword containment against the source
            match self.source.query_by_keywords(&terms).await {
                Ok(rows) if !rows.is_empty() => {
                    let (listings, _) = normalizer::normalize(&rows);
                    if let Some(hit) = listings.first() {
                        return self.reply_for(hit, MatchTier::Keyword);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Keyword query failed: {:#}", e),
            }

            // 2. Fuzzy scan over the full set
            match self.source.fetch_listings().await {
                Ok(rows) => {
                    let (listings, _) = normalizer::normalize(&rows);
                    if let Some(hit) = listings.iter().find(|l| fuzzy_match(l, &terms)) {
                        return self.reply_for(hit, MatchTier::FuzzyScan);
                    }
                }
                Err(e) => warn!("Fuzzy scan failed: {:#}", e),
            }
        }

        // 3. Remote fallback endpoint
        match self.remote_fallback(&query).await {
            Ok(Some(reply)) => return ChatReply::Remote { reply },
            Ok(None) => {}
            Err(e) => warn!("Fallback endpoint failed: {:#}", e),
        }

        // 4. Generic availability claim
        ChatReply::Generic {
            link: links::chat_link(&self.config.chat_whatsapp, &query),
            query,
        }
    }

    fn reply_for(&self, listing: &Listing, tier: MatchTier) -> ChatReply {
        ChatReply::Match {
            tier,
            name: listing.name.clone(),
            price: listing.price.display.clone(),
            stock: listing.stock.clone(),
            link: links::booking_link(&self.config.chat_whatsapp, &listing.name),
        }
    }

    async fn remote_fallback(&self, query: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}?q={}",
            self.config.fallback_url,
            links::encode_component(query)
        );

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Ok(None);
        }

        let payload: FallbackPayload = resp.json().await?;
        Ok(payload.reply.filter(|r| !r.is_empty()))
    }
}

/// Any query term appearing inside the name or a keyword counts as a hit.
fn fuzzy_match(listing: &Listing, terms: &[String]) -> bool {
    let name = listing.name.to_lowercase();
    terms.iter().any(|term| {
        name.contains(term)
            || listing
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(term))
    })
}

/// Autocomplete hints: case-insensitive substring over the configured list,
/// at most five, only once the query has some substance.
pub fn suggestions<'s>(list: &'s [String], input: &str) -> Vec<&'s str> {
    let needle = input.trim().to_lowercase();
    if needle.len() < 2 {
        return Vec::new();
    }

    list.iter()
        .filter(|s| s.to_lowercase().contains(&needle))
        .take(5)
        .map(String::as_str)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
