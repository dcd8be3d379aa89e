//! Line-chart widget state: the orchestrator tying client → process →
//! window → chart together.
//!
//! ## Lifecycle
//!
//! `load()` — fetch + process + window for the current inputs. On any
//!   fetch/transform failure the error is logged, both sequences are
//!   cleared and the loading flag drops; the caller sees an empty chart,
//!   nothing propagates.
//! `set_range()` — re-window from the processed sequence, no refetch.
//! `set_inputs()` — change symbol / currency / rate; invalidates any
//!   in-flight load so a stale response cannot overwrite newer state.

use crate::chart::ChartSpec;
use crate::client::QuotationSource;
use crate::config::ChartConfig;
use crate::models::{Currency, PricePoint, RawQuotation, TimeRange};
use crate::process::process_quotations;
use crate::window::visible_points;
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, error, info};

pub struct LineChartWidget {
    cod: String,
    currency: Currency,
    exchange_rate: f64,
    range: TimeRange,
    chart_config: ChartConfig,

    processed: Vec<PricePoint>,
    visible: Vec<PricePoint>,
    loading: bool,

    // Bumped by every load and by set_inputs; a load result is applied
    // only if the generation it started under is still current.
    load_gen: u64,

    on_close: Option<Box<dyn FnMut() + Send>>,
}

impl LineChartWidget {
    pub fn new(
        cod: impl Into<String>,
        currency: Currency,
        exchange_rate: f64,
        chart_config: ChartConfig,
    ) -> Self {
        Self {
            cod: cod.into(),
            currency,
            exchange_rate,
            range: TimeRange::OneDay,
            chart_config,
            processed: Vec::new(),
            visible: Vec::new(),
            loading: false,
            load_gen: 0,
            on_close: None,
        }
    }

    pub fn with_on_close(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Fetch and process the full series for the current inputs, then
    /// window it for the current range selection.
    pub async fn load(&mut self, source: &dyn QuotationSource) {
        self.loading = true;
        self.load_gen += 1;
        let started_gen = self.load_gen;

        let outcome = self.fetch_and_process(source).await;
        self.apply_load(started_gen, outcome);
    }

    async fn fetch_and_process(&self, source: &dyn QuotationSource) -> Result<Vec<PricePoint>> {
        let raw: Vec<RawQuotation> = source
            .fetch_quotations(&self.cod)
            .await
            .with_context(|| format!("fetch_quotations({})", self.cod))?;

        let points = process_quotations(&raw, self.currency, self.exchange_rate)
            .with_context(|| format!("process_quotations({})", self.cod))?;

        debug!("{}: {} rows processed", self.cod, points.len());
        Ok(points)
    }

    /// Apply a finished load, unless a newer load or input change has
    /// superseded it in the meantime.
    fn apply_load(&mut self, started_gen: u64, outcome: Result<Vec<PricePoint>>) {
        if started_gen != self.load_gen {
            debug!("{}: discarding stale load (gen {})", self.cod, started_gen);
            return;
        }

        match outcome {
            Ok(points) => {
                info!("{}: {} points loaded", self.cod, points.len());
                self.processed = points;
                self.rewindow();
            }
            Err(e) => {
                error!("{}: quotation load failed: {:#}", self.cod, e);
                self.processed.clear();
                self.visible.clear();
            }
        }
        self.loading = false;
    }

    // ── Selection and inputs ──────────────────────────────────────────────────

    /// Change the visible window. Re-windows in place; no refetch.
    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
        self.rewindow();
    }

    /// Change the fetch inputs. Clears current data and invalidates any
    /// in-flight load; call `load()` again to repopulate.
    pub fn set_inputs(&mut self, cod: impl Into<String>, currency: Currency, exchange_rate: f64) {
        self.cod = cod.into();
        self.currency = currency;
        self.exchange_rate = exchange_rate;
        self.load_gen += 1;
        self.processed.clear();
        self.visible.clear();
    }

    fn rewindow(&mut self) {
        self.visible = visible_points(
            &self.processed,
            self.range,
            Utc::now(),
            self.chart_config.max_points,
        );
    }

    // ── Render hand-off ───────────────────────────────────────────────────────

    /// The chart spec for the current visible subset, or `None` while a
    /// load is outstanding.
    pub fn chart_spec(&self) -> Option<ChartSpec> {
        if self.loading {
            return None;
        }
        Some(ChartSpec::build(
            &self.cod,
            self.currency,
            self.visible.clone(),
            &self.chart_config,
        ))
    }

    pub fn close(&mut self) {
        if let Some(cb) = self.on_close.as_mut() {
            cb();
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn visible(&self) -> &[PricePoint] {
        &self.visible
    }

    pub fn processed_len(&self) -> usize {
        self.processed.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubSource {
        rows: Result<Vec<RawQuotation>, String>,
    }

    #[async_trait]
    impl QuotationSource for StubSource {
        async fn fetch_quotations(&self, _cod: &str) -> Result<Vec<RawQuotation>> {
            match &self.rows {
                Ok(rows) => Ok(rows.clone()),
                Err(msg) => Err(anyhow::anyhow!("{}", msg)),
            }
        }
    }

    fn chart_config() -> ChartConfig {
        ChartConfig {
            height: 250,
            max_points: 1000,
            stroke_color: "#00c8ff".into(),
            background: "#121212".into(),
        }
    }

    fn recent_rows(n: usize) -> Vec<RawQuotation> {
        // Timestamps inside the last day so the default 1d window keeps them.
        let today = Utc::now().date_naive();
        (0..n)
            .map(|i| RawQuotation {
                fecha: today.format("%Y-%m-%d").to_string(),
                hora: format!("{:02}:{:02}", i / 60, i % 60),
                cotizacion: format!("{}", 100 + i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_load_populates_and_clears_loading() {
        let source = StubSource {
            rows: Ok(recent_rows(3)),
        };
        let mut widget = LineChartWidget::new("YPF", Currency::Usd, 1.0, chart_config());

        widget.load(&source).await;

        assert!(!widget.is_loading());
        assert_eq!(widget.processed_len(), 3);
        let spec = widget.chart_spec().unwrap();
        assert_eq!(spec.options.title.text, "Cotización del Mercado De YPF");
    }

    #[tokio::test]
    async fn test_failed_load_leaves_empty_chart() {
        let source = StubSource {
            rows: Err("connection refused".into()),
        };
        let mut widget = LineChartWidget::new("YPF", Currency::Usd, 1.0, chart_config());

        widget.load(&source).await;

        assert!(!widget.is_loading());
        assert_eq!(widget.processed_len(), 0);
        assert_eq!(widget.chart_spec().unwrap().point_count(), 0);
    }

    #[tokio::test]
    async fn test_set_range_rewindows_without_refetch() {
        let source = StubSource {
            rows: Ok(recent_rows(5)),
        };
        let mut widget = LineChartWidget::new("YPF", Currency::Usd, 1.0, chart_config());
        widget.load(&source).await;

        widget.set_range(TimeRange::All);
        assert_eq!(widget.range(), TimeRange::All);
        assert_eq!(widget.visible().len(), 5);
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let mut widget = LineChartWidget::new("YPF", Currency::Usd, 1.0, chart_config());

        // A load started under an old generation...
        widget.loading = true;
        widget.load_gen += 1;
        let stale_gen = widget.load_gen;

        // ...superseded by an input change before it resolves.
        widget.set_inputs("GGAL", Currency::Yen, 150.0);

        let stale_points = process_quotations(&recent_rows(4), Currency::Usd, 1.0).unwrap();
        widget.apply_load(stale_gen, Ok(stale_points));

        // The stale response must not overwrite the newer (empty) state.
        assert_eq!(widget.processed_len(), 0);
    }

    #[tokio::test]
    async fn test_close_invokes_callback() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let closed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&closed);
        let mut widget = LineChartWidget::new("YPF", Currency::Usd, 1.0, chart_config())
            .with_on_close(move || flag.store(true, Ordering::SeqCst));

        widget.close();
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_chart_spec_none_while_loading() {
        let mut widget = LineChartWidget::new("YPF", Currency::Usd, 1.0, chart_config());
        widget.loading = true;
        assert!(widget.chart_spec().is_none());
    }
}
