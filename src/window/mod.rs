//! Visible-window selection over the processed series.
//!
//! Fixed ranges filter by wall-clock duration before `now`. The "all"
//! range instead decimates by original index so the renderer never gets
//! more than roughly `max_points` points. Both selections preserve
//! source order; neither re-sorts.

use crate::models::{PricePoint, TimeRange};
use chrono::{DateTime, Duration, Utc};

/// Keep points whose timestamp lies within the range's duration before
/// `now` (boundary inclusive). `All` passes through unchanged.
pub fn filter_by_range(
    points: &[PricePoint],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<PricePoint> {
    let Some(days) = range.days() else {
        return points.to_vec();
    };

    let window = Duration::days(days);
    points
        .iter()
        .filter(|p| now.signed_duration_since(p.timestamp) <= window)
        .copied()
        .collect()
}

/// Fixed-stride decimation by original index: keeps indices 0, s, 2s, …
/// A deterministic subsequence, not a statistical summary.
pub fn downsample(points: &[PricePoint], stride: usize) -> Vec<PricePoint> {
    let stride = stride.max(1);
    points
        .iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .map(|(_, p)| *p)
        .collect()
}

/// The subset handed to the renderer for a given selection.
pub fn visible_points(
    points: &[PricePoint],
    range: TimeRange,
    now: DateTime<Utc>,
    max_points: usize,
) -> Vec<PricePoint> {
    match range {
        TimeRange::All => {
            let stride = (points.len() / max_points.max(1)).max(1);
            downsample(points, stride)
        }
        _ => filter_by_range(points, range, now),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(ts: DateTime<Utc>, value: f64) -> PricePoint {
        PricePoint {
            timestamp: ts,
            value,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_one_day_window_boundary() {
        let now = at(2024, 1, 10, 0, 0);
        let inside = point(at(2024, 1, 9, 0, 1), 1.0);
        let outside = point(at(2024, 1, 8, 23, 59), 2.0);
        let exactly = point(at(2024, 1, 9, 0, 0), 3.0);

        let kept = filter_by_range(&[inside, outside, exactly], TimeRange::OneDay, now);
        let values: Vec<f64> = kept.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_window_durations() {
        let now = at(2024, 3, 31, 12, 0);
        // One point per day going back 40 days.
        let points: Vec<PricePoint> = (0..40)
            .map(|d| point(now - Duration::days(d), d as f64))
            .collect();

        assert_eq!(filter_by_range(&points, TimeRange::OneDay, now).len(), 2);
        assert_eq!(filter_by_range(&points, TimeRange::ThreeDays, now).len(), 4);
        assert_eq!(filter_by_range(&points, TimeRange::OneWeek, now).len(), 8);
        assert_eq!(filter_by_range(&points, TimeRange::OneMonth, now).len(), 31);
        assert_eq!(filter_by_range(&points, TimeRange::All, now).len(), 40);
    }

    #[test]
    fn test_downsample_keeps_ceil_len_over_stride() {
        let now = at(2024, 1, 1, 0, 0);
        let points: Vec<PricePoint> = (0..7).map(|i| point(now, i as f64)).collect();

        let kept = downsample(&points, 3);
        let values: Vec<f64> = kept.iter().map(|p| p.value).collect();
        // ceil(7/3) = 3, at original indices 0, 3, 6.
        assert_eq!(values, vec![0.0, 3.0, 6.0]);
    }

    #[test]
    fn test_downsample_stride_zero_treated_as_one() {
        let now = at(2024, 1, 1, 0, 0);
        let points: Vec<PricePoint> = (0..5).map(|i| point(now, i as f64)).collect();
        assert_eq!(downsample(&points, 0).len(), 5);
    }

    #[test]
    fn test_all_range_downsamples_2500_to_1250() {
        let now = at(2024, 1, 1, 0, 0);
        let points: Vec<PricePoint> = (0..2500).map(|i| point(now, i as f64)).collect();

        let visible = visible_points(&points, TimeRange::All, now, 1000);
        assert_eq!(visible.len(), 1250);
        assert_eq!(visible[1].value, 2.0);
    }

    #[test]
    fn test_all_range_short_series_kept_whole() {
        let now = at(2024, 1, 1, 0, 0);
        let points: Vec<PricePoint> = (0..999).map(|i| point(now, i as f64)).collect();
        assert_eq!(visible_points(&points, TimeRange::All, now, 1000).len(), 999);
    }
}
