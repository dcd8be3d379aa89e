//! Chart-spec assembly: the hand-off artifact for the external line
//! renderer. No computation beyond string formatting — the visible
//! series is passed through untouched.

use crate::config::ChartConfig;
use crate::models::{Currency, PricePoint};
use serde::Serialize;

/// Complete chart description: options + the single quotation series.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub options: ChartOptions,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<PricePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartOptions {
    pub chart: ChartArea,
    pub title: Title,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
    pub stroke: Stroke,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartArea {
    #[serde(rename = "type")]
    pub kind: String,
    pub height: u32,
    pub background: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub align: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct XAxis {
    #[serde(rename = "type")]
    pub kind: String,
    /// Axis label format, renderer syntax.
    pub format: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct YAxis {
    /// Currency symbol prefixed to every label.
    pub prefix: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stroke {
    pub curve: String,
    pub width: u8,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tooltip {
    pub theme: String,
    pub x_format: String,
}

impl ChartSpec {
    /// Assemble the spec for one symbol's visible points.
    pub fn build(
        cod: &str,
        currency: Currency,
        visible: Vec<PricePoint>,
        config: &ChartConfig,
    ) -> Self {
        Self {
            options: ChartOptions {
                chart: ChartArea {
                    kind: "line".into(),
                    height: config.height,
                    background: config.background.clone(),
                },
                title: Title {
                    text: format!("Cotización del Mercado De {}", cod),
                    align: "center".into(),
                },
                xaxis: XAxis {
                    kind: "datetime".into(),
                    format: "dd/MM HH:mm".into(),
                },
                yaxis: YAxis {
                    prefix: currency.symbol().into(),
                    decimals: 2,
                },
                stroke: Stroke {
                    curve: "smooth".into(),
                    width: 1,
                    colors: vec![config.stroke_color.clone()],
                },
                tooltip: Tooltip {
                    theme: "dark".into(),
                    x_format: "dd/MM/yyyy HH:mm".into(),
                },
            },
            series: vec![Series {
                name: "Cotización".into(),
                data: visible,
            }],
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.data.len()).sum()
    }
}

/// A y-axis label the way the renderer's formatter would print it.
pub fn format_value(currency: Currency, value: f64) -> String {
    format!("{} {:.2}", currency.symbol(), value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_value_by_currency() {
        assert_eq!(format_value(Currency::Usd, 1234.5), "$ 1234.50");
        assert_eq!(format_value(Currency::Yen, 15000.0), "¥ 15000.00");
    }

    #[test]
    fn test_spec_carries_series_untouched() {
        let points = vec![PricePoint {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap(),
            value: 100.0,
        }];
        let spec = ChartSpec::build("YPF", Currency::Usd, points.clone(), &test_config());

        assert_eq!(spec.point_count(), 1);
        assert_eq!(spec.series[0].name, "Cotización");
        assert_eq!(spec.series[0].data, points);
        assert_eq!(spec.options.title.text, "Cotización del Mercado De YPF");
        assert_eq!(spec.options.yaxis.prefix, "$");
    }

    #[test]
    fn test_spec_serializes_renderer_shape() {
        let spec = ChartSpec::build("YPF", Currency::Yen, vec![], &test_config());
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["options"]["chart"]["type"], "line");
        assert_eq!(json["options"]["yaxis"]["prefix"], "¥");
        assert_eq!(json["options"]["xaxis"]["format"], "dd/MM HH:mm");
        assert_eq!(json["series"][0]["data"], serde_json::json!([]));
    }

    fn test_config() -> ChartConfig {
        ChartConfig {
            height: 250,
            max_points: 1000,
            stroke_color: "#00c8ff".into(),
            background: "#121212".into(),
        }
    }
}
