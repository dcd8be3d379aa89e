//! Raw quotation rows → chart points.
//!
//! Each backend row carries a date, a time and a price, all as strings.
//! The date and time are wall-clock readings at the exchange, so they are
//! interpreted in the exchange's zone (Asia/Tokyo) and stored as UTC.
//! The output always has the same length and order as the input.

use crate::models::{Currency, PricePoint, RawQuotation};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Asia::Tokyo;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("bad quotation timestamp {fecha}T{hora}")]
    BadTimestamp { fecha: String, hora: String },

    #[error("local time {0} does not exist or is ambiguous in Asia/Tokyo")]
    UnresolvableLocalTime(NaiveDateTime),
}

/// Combine the date and time fields into one absolute instant.
/// "2024-01-01" + "10:00" → 2024-01-01T10:00:00 Tokyo → 01:00:00Z.
pub fn combine_datetime(fecha: &str, hora: &str) -> Result<DateTime<Utc>, ProcessError> {
    let joined = format!("{}T{}:00", fecha.trim(), hora.trim());
    let naive = NaiveDateTime::parse_from_str(&joined, "%Y-%m-%dT%H:%M:%S").map_err(|_| {
        ProcessError::BadTimestamp {
            fecha: fecha.to_string(),
            hora: hora.to_string(),
        }
    })?;

    // Tokyo has no DST, so this resolves uniquely in practice.
    let local = Tokyo
        .from_local_datetime(&naive)
        .single()
        .ok_or(ProcessError::UnresolvableLocalTime(naive))?;

    Ok(local.with_timezone(&Utc))
}

/// Parse the price string. Malformed prices are not an error: they pass
/// through as NaN and the renderer shows a gap, matching the backend's
/// loose contract.
pub fn parse_quote_value(s: &str) -> f64 {
    s.trim().parse().unwrap_or(f64::NAN)
}

/// Map every raw row to a point, rescaling by the exchange rate when the
/// display currency differs from the source denomination (USD).
pub fn process_quotations(
    raw: &[RawQuotation],
    currency: Currency,
    exchange_rate: f64,
) -> Result<Vec<PricePoint>, ProcessError> {
    raw.iter()
        .map(|row| {
            let timestamp = combine_datetime(&row.fecha, &row.hora)?;
            let value = parse_quote_value(&row.cotizacion);
            let value = if currency.is_source() {
                value
            } else {
                value * exchange_rate
            };
            Ok(PricePoint { timestamp, value })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
