use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Raw quotation record ──────────────────────────────────────────────────────

/// One row from `GET /cotizaciones/allCotizacionEmpByCod/{cod}`, verbatim.
/// All fields arrive as strings; typing happens in `process`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawQuotation {
    pub fecha: String,      // "2024-01-01"
    pub hora: String,       // "10:00"
    pub cotizacion: String, // "100.50"
}

// ── Processed point ───────────────────────────────────────────────────────────

/// A chart-ready point. Serializes as `{"x": <epoch millis>, "y": <value>}`,
/// the shape the line renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl Serialize for PricePoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("PricePoint", 2)?;
        s.serialize_field("x", &self.timestamp.timestamp_millis())?;
        s.serialize_field("y", &self.value)?;
        s.end()
    }
}

// ── Display currency ──────────────────────────────────────────────────────────

/// Display currency for the chart. Quotes arrive denominated in USD; YEN
/// display rescales by the exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Yen,
}

impl Currency {
    /// Axis/tooltip symbol: "$" for USD, "¥" otherwise.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Yen => "¥",
        }
    }

    /// True when no rescaling applies (display == source denomination).
    pub fn is_source(&self) -> bool {
        matches!(self, Currency::Usd)
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "YEN" | "JPY" => Ok(Currency::Yen),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
            Currency::Yen => write!(f, "YEN"),
        }
    }
}

// ── Visible window ────────────────────────────────────────────────────────────

/// User-selected visible time range. Fixed windows filter by wall-clock
/// duration; `All` shows the whole series, downsampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    OneDay,
    ThreeDays,
    OneWeek,
    OneMonth,
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 5] = [
        TimeRange::OneDay,
        TimeRange::ThreeDays,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::All,
    ];

    /// Window length in days; `None` for `All`.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimeRange::OneDay => Some(1),
            TimeRange::ThreeDays => Some(3),
            TimeRange::OneWeek => Some(7),
            TimeRange::OneMonth => Some(30),
            TimeRange::All => None,
        }
    }

    /// Short code used on the CLI and in the UI buttons.
    pub fn code(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::ThreeDays => "3d",
            TimeRange::OneWeek => "1w",
            TimeRange::OneMonth => "1m",
            TimeRange::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1 Día",
            TimeRange::ThreeDays => "3 Días",
            TimeRange::OneWeek => "1 Semana",
            TimeRange::OneMonth => "1 Mes",
            TimeRange::All => "Todo",
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(TimeRange::OneDay),
            "3d" => Ok(TimeRange::ThreeDays),
            "1w" => Ok(TimeRange::OneWeek),
            "1m" => Ok(TimeRange::OneMonth),
            "all" => Ok(TimeRange::All),
            other => Err(format!("unknown range: {other} (expected 1d|3d|1w|1m|all)")),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
