//! Configuration options for seisview.

use std::path::Path;
use std::time::Duration;

use glam::{DVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::amplitude::{BaseRangeMode, QuantileWindow};
use crate::error::Result;

/// Sentinel amplitude written for missing or null slice cells.
pub const MISSING_AMPLITUDE: f64 = -0.999;

/// Global configuration options for a viewer.
///
/// Every field has a default, so a JSON file only needs to list overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Quiet period after the last slider event before a slice is fetched.
    pub debounce_ms: u64,

    /// Period of the compass reconciliation poll (50 ms = 20 Hz).
    pub camera_poll_ms: u64,

    /// Delay between a camera-change notification and the compass update.
    pub camera_settle_ms: u64,

    /// Minimum compass change, in degrees, the poll will apply.
    pub compass_threshold_deg: f64,

    /// Added to the negated camera azimuth so the compass reads zero at the
    /// default camera pose.
    pub compass_offset_deg: f64,

    /// Default camera eye, relative to the scene center.
    pub camera_eye: DVec3,

    /// Default camera up vector.
    pub camera_up: DVec3,

    /// Default camera look-at point.
    pub camera_center: DVec3,

    /// Name of the diverging color map used for the slices.
    pub color_map: String,

    /// Amplitude written for missing cells.
    pub missing_amplitude: f64,

    /// Determinant magnitude below which the survey basis counts as degenerate.
    pub orientation_epsilon: f64,

    /// Whether to draw the north arrow.
    pub show_north_arrow: bool,

    /// North arrow length as a fraction of the larger horizontal cube extent.
    pub arrow_length_fraction: f64,

    /// Offset of the arrow outside the cube, as a fraction of each axis extent.
    pub arrow_offset_fraction: f64,

    /// Which statistics the amplitude quantiles are relative to.
    pub base_range_mode: BaseRangeMode,

    /// Quantile window applied on the first user edit.
    pub quantiles: QuantileWindow,

    /// Maximum number of slices kept by a caching slice source.
    pub slice_cache_capacity: u64,

    /// Scene background color.
    pub background_color: Vec3,

    /// Draw the sample axis increasing downwards.
    pub reverse_sample_axis: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            camera_poll_ms: 50,
            camera_settle_ms: 50,
            compass_threshold_deg: 0.5,
            compass_offset_deg: 45.0,
            camera_eye: DVec3::new(1.25, 1.25, 1.25),
            camera_up: DVec3::Z,
            camera_center: DVec3::ZERO,
            color_map: "seismic".to_string(),
            missing_amplitude: MISSING_AMPLITUDE,
            orientation_epsilon: 1e-9,
            show_north_arrow: true,
            arrow_length_fraction: 0.15,
            arrow_offset_fraction: 0.1,
            base_range_mode: BaseRangeMode::Percentile,
            quantiles: QuantileWindow::default(),
            slice_cache_capacity: 200,
            background_color: Vec3::new(1.0, 1.0, 1.0),
            reverse_sample_axis: true,
        }
    }
}

impl Options {
    /// Parses options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn camera_poll_period(&self) -> Duration {
        Duration::from_millis(self.camera_poll_ms.max(1))
    }

    pub fn camera_settle_delay(&self) -> Duration {
        Duration::from_millis(self.camera_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = Options::default();
        assert_eq!(options.debounce_delay(), Duration::from_millis(150));
        assert_eq!(options.camera_poll_period(), Duration::from_millis(50));
        assert_eq!(options.missing_amplitude, -0.999);
        assert_eq!(options.color_map, "seismic");
    }

    #[test]
    fn test_offset_matches_default_eye() {
        let options = Options::default();
        let eye = options.camera_eye;
        assert!((eye.y.atan2(eye.x).to_degrees() - options.compass_offset_deg).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json() {
        let options = Options::from_json(r#"{"debounce_ms": 300, "color_map": "greys"}"#).unwrap();
        assert_eq!(options.debounce_ms, 300);
        assert_eq!(options.color_map, "greys");
        assert_eq!(options.camera_poll_ms, 50);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Options::load("/nonexistent/seisview.json").unwrap_err();
        assert!(matches!(err, crate::SeisviewError::IoError(_)));
    }
}
