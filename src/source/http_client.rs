use crate::config::SourceConfig;
use crate::source::SourceError;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, warn};

pub struct HttpClient {
    inner: reqwest::Client,
    retry_delay: Duration,
    max_retries: usize,
}

impl HttpClient {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            inner,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            max_retries: config.max_retries as usize,
        })
    }

    /// Fetch a URL as text, retrying on a fixed delay. A failed load is a
    /// retry state, never a crash; the error only surfaces once every
    /// configured attempt is spent.
    pub async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let strategy = FixedInterval::new(self.retry_delay).take(self.max_retries);
        Retry::spawn(strategy, || self.fetch_once(url)).await
    }

    async fn fetch_once(&self, url: &str) -> Result<String, SourceError> {
        debug!("GET {}", url);

        let resp = self.inner.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(SourceError::Status(status));
        }

        Ok(resp.text().await?)
    }
}
