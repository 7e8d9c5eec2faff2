//! Amplitude statistics for cubes and single slices.

use serde::{Deserialize, Serialize};

use crate::types::AmplitudeStats;

/// Summary statistics of one slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}

impl SliceStats {
    /// Computes min/max/mean/population std. Returns `None` for no values.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for v in values {
            count += 1;
            min = min.min(v);
            max = max.max(v);
            sum += v;
            sum_sq += v * v;
        }
        if count == 0 {
            return None;
        }
        let n = count as f64;
        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        Some(Self {
            min,
            max,
            mean,
            std: variance.sqrt(),
        })
    }
}

/// Linear-interpolated percentile of already sorted values, `q` in `[0, 100]`.
///
/// # Panics
///
/// Panics if `sorted` is empty.
#[must_use]
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = (q.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Whole-cube statistics: extremes, moments and the 1/5/95/99 percentiles.
///
/// The suggested display range is the 5th..95th percentile window.
/// Returns `None` when there are no values.
pub fn cube_stats(values: impl IntoIterator<Item = f64>) -> Option<AmplitudeStats> {
    let mut sorted: Vec<f64> = values.into_iter().collect();
    let summary = SliceStats::from_values(sorted.iter().copied())?;
    sorted.sort_by(f64::total_cmp);

    let p1 = percentile(&sorted, 1.0);
    let p5 = percentile(&sorted, 5.0);
    let p95 = percentile(&sorted, 95.0);
    let p99 = percentile(&sorted, 99.0);

    Some(AmplitudeStats {
        actual_min: summary.min,
        actual_max: summary.max,
        display_min: p5,
        display_max: p95,
        mean: summary.mean,
        std: summary.std,
        p1: Some(p1),
        p5: Some(p5),
        p95: Some(p95),
        p99: Some(p99),
    })
}
