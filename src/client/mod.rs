//! Backend quotation endpoint client.
//!
//! One GET per load, no retry: a failed fetch is logged by the caller and
//! the chart stays empty until the next load.

use crate::config::ClientConfig;
use crate::models::RawQuotation;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable data source abstraction.
#[async_trait]
pub trait QuotationSource: Send + Sync {
    /// All quotation rows for a company symbol, in backend order.
    async fn fetch_quotations(&self, cod: &str) -> Result<Vec<RawQuotation>>;
}

// ── HTTP source ───────────────────────────────────────────────────────────────

pub struct HttpQuotationSource {
    inner: reqwest::Client,
    base_url: String,
}

impl HttpQuotationSource {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL for a symbol's full quotation history.
    fn quotations_url(&self, cod: &str) -> String {
        format!("{}/cotizaciones/allCotizacionEmpByCod/{}", self.base_url, cod)
    }
}

#[async_trait]
impl QuotationSource for HttpQuotationSource {
    async fn fetch_quotations(&self, cod: &str) -> Result<Vec<RawQuotation>> {
        let url = self.quotations_url(cod);
        debug!("GET {}", url);

        let resp = self
            .inner
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request failed for {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} from {}", status, url);
        }

        let rows: Vec<RawQuotation> = resp
            .json()
            .await
            .with_context(|| format!("Failed to decode quotation JSON for {}", cod))?;

        debug!("{}: {} quotation rows", cod, rows.len());
        Ok(rows)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
