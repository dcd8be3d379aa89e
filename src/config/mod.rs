use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub chart: ChartConfig,
}

/// Quotation endpoint client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Chart presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_height")]
    pub height: u32,

    /// Downsample target for the "all" range. The stride is chosen so the
    /// visible series stays near this count.
    #[serde(default = "default_max_points")]
    pub max_points: usize,

    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,

    #[serde(default = "default_background")]
    pub background: String,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    "quote-chart/0.1 (market quotation line chart)".to_string()
}
fn default_height() -> u32 {
    250
}
fn default_max_points() -> usize {
    1000
}
fn default_stroke_color() -> String {
    "#00c8ff".to_string()
}
fn default_background() -> String {
    "#121212".to_string()
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
            .add_source(config::Environment::with_prefix("QUOTE").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig {
                base_url: default_base_url(),
                timeout_secs: default_timeout_secs(),
                user_agent: default_user_agent(),
            },
            chart: ChartConfig {
                height: default_height(),
                max_points: default_max_points(),
                stroke_color: default_stroke_color(),
                background: default_background(),
            },
        }
    }
}
