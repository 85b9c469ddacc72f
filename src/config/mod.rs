use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub pulse: PulseConfig,

    #[serde(default)]
    pub chat: ChatConfig,
}

/// Where the stock document lives and how to fetch it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    #[serde(default = "default_kind")]
    pub kind: SourceKind,

    #[serde(default = "default_stock_url")]
    pub stock_url: String,

    #[serde(default = "default_stock_path")]
    pub stock_path: PathBuf,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    File,
}

/// Pulse view configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PulseConfig {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    #[serde(default = "default_news_feed")]
    pub news_feed: Vec<String>,
}

/// Alliya chat widget configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    #[serde(default = "default_shop_whatsapp")]
    pub shop_whatsapp: String,

    #[serde(default = "default_chat_whatsapp")]
    pub chat_whatsapp: String,

    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_kind() -> SourceKind {
    SourceKind::Http
}
fn default_stock_url() -> String {
    "https://grainshub.ae/assets/data/stock.json".to_string()
}
fn default_stock_path() -> PathBuf {
    PathBuf::from("assets/data/stock.json")
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_retry_delay_ms() -> u64 {
    5000
}
fn default_max_retries() -> u32 {
    1
}
fn default_user_agent() -> String {
    "grains-hub/0.1 (market engine)".to_string()
}
fn default_refresh_secs() -> u64 {
    60
}
fn default_preview_limit() -> usize {
    6
}
fn default_news_feed() -> Vec<String> {
    [
        "1509 Creamy Sella booking opens at $920 C&F Dubai",
        "Irri 6 5% drops to $385 C&F Dubai – prompt shipment",
        "Sona Massori booking at $540 C&F Dubai",
        "Sawarna Rice booking at $475 C&F Dubai",
        "Jebel Ali FCL arrivals: +12 containers this week",
        "Thai White 5% Broken: $485 C&F – 20ft ready",
        "1121 Sella Premium: AED 6.2/kg – Al Ras stock",
    ]
    .map(String::from)
    .to_vec()
}
fn default_fallback_url() -> String {
    "https://grains-backend.onrender.com/api/alliya".to_string()
}
fn default_shop_whatsapp() -> String {
    "971501234567".to_string()
}
fn default_chat_whatsapp() -> String {
    "971585521976".to_string()
}
fn default_suggestions() -> Vec<String> {
    [
        "1121 price",
        "irri 6 stock",
        "1509 sella",
        "golden sella",
        "fcl india",
        "thai rice",
        "booking",
    ]
    .map(String::from)
    .to_vec()
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("GRAINS").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            stock_url: default_stock_url(),
            stock_path: default_stock_path(),
            timeout_secs: default_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            preview_limit: default_preview_limit(),
            news_feed: default_news_feed(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback_url: default_fallback_url(),
            shop_whatsapp: default_shop_whatsapp(),
            chat_whatsapp: default_chat_whatsapp(),
            suggestions: default_suggestions(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
