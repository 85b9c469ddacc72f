//! Stock document acquisition.
//!
//! The catalog lives either behind HTTP (stock.json on the site) or in a
//! local JSON file standing in for the hosted product collection. Both
//! implement the same trait so the rest of the engine never cares which
//! one is configured.

pub mod http_client;

use crate::config::{SourceConfig, SourceKind};
use crate::models::RawListing;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use url::Url;

use self::http_client::HttpClient;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid stock url: {0}")]
    Url(#[from] url::ParseError),

    #[error("malformed stock document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable stock document source.
#[async_trait]
pub trait StockSource: Send + Sync {
    /// Fetch the full listing set. Each successful call wholly replaces
    /// whatever the caller held before.
    async fn fetch_listings(&self) -> Result<Vec<RawListing>, SourceError>;

    /// Keyword-containment query (document-store `array-contains-any`
    /// semantics). Default: fetch everything and filter locally, so file
    /// and HTTP sources honor the same contract.
    async fn query_by_keywords(&self, terms: &[String]) -> Result<Vec<RawListing>, SourceError> {
        let rows = self.fetch_listings().await?;
        Ok(rows
            .into_iter()
            .filter(|row| {
                row.keywords
                    .iter()
                    .any(|k| terms.iter().any(|t| k.eq_ignore_ascii_case(t)))
            })
            .collect())
    }
}

/// Build the configured source.
pub fn from_config(config: &SourceConfig) -> Result<Box<dyn StockSource>, SourceError> {
    Ok(match config.kind {
        SourceKind::Http => Box::new(HttpSource::new(config)?),
        SourceKind::File => Box::new(FileSource::new(config.stock_path.clone())),
    })
}

// ── HTTP source ───────────────────────────────────────────────────────────────

pub struct HttpSource {
    client: HttpClient,
    stock_url: String,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        Ok(Self {
            client: HttpClient::new(config)?,
            stock_url: config.stock_url.clone(),
        })
    }

    /// Stock URL with a `t=<millis>` cache-busting parameter appended.
    fn cache_busted(&self) -> Result<String, SourceError> {
        let mut url = Url::parse(&self.stock_url)?;
        url.query_pairs_mut()
            .append_pair("t", &Utc::now().timestamp_millis().to_string());
        Ok(url.into())
    }
}

#[async_trait]
impl StockSource for HttpSource {
    async fn fetch_listings(&self) -> Result<Vec<RawListing>, SourceError> {
        let url = self.cache_busted()?;
        let body = self.client.get_text(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ── File source ───────────────────────────────────────────────────────────────

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl StockSource for FileSource {
    async fn fetch_listings(&self) -> Result<Vec<RawListing>, SourceError> {
        debug!("Reading stock document from {:?}", self.path);
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
