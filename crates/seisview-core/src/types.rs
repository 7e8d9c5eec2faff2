//! Dataset metadata shared by every seisview component.
//!
//! A [`CubeInfo`] is produced once per successful dataset load and replaced
//! wholesale on the next one; nothing in the engine mutates it in place.

use std::fmt;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// One of the three orthogonal slice directions of a seismic cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceKind {
    /// Constant inline number; varies over crossline and sample.
    Inline,
    /// Constant crossline number; varies over inline and sample.
    Xline,
    /// Constant sample (time/depth); varies over inline and crossline.
    Sample,
}

impl SliceKind {
    /// All slice kinds, in cube dimension order.
    pub const ALL: [SliceKind; 3] = [SliceKind::Inline, SliceKind::Xline, SliceKind::Sample];

    /// Returns the cube dimension this kind indexes.
    #[must_use]
    pub fn dim(self) -> usize {
        match self {
            SliceKind::Inline => 0,
            SliceKind::Xline => 1,
            SliceKind::Sample => 2,
        }
    }

    /// Name used in the slice-fetch path (`/api/slice/{name}/{index}`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SliceKind::Inline => "inline",
            SliceKind::Xline => "xline",
            SliceKind::Sample => "sample",
        }
    }

    /// Human readable label used in hover text and legends.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SliceKind::Inline => "Inline",
            SliceKind::Xline => "Crossline",
            SliceKind::Sample => "Sample",
        }
    }

    /// Parses a wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "inline" => Some(SliceKind::Inline),
            "xline" => Some(SliceKind::Xline),
            "sample" => Some(SliceKind::Sample),
            _ => None,
        }
    }
}

impl fmt::Display for SliceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value range of one cube axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl AxisRange {
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// Span between the first and last value.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    /// Largest valid index on this axis.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// Survey line number at `index`, assuming unit line increments.
    #[must_use]
    pub fn line_at(&self, index: usize) -> f64 {
        self.min + index as f64
    }

    /// Axis value at `index` for evenly (possibly fractionally) spaced samples.
    #[must_use]
    pub fn interpolate(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return self.min;
        }
        self.min + index as f64 * self.extent() / (self.count - 1) as f64
    }
}

/// Amplitude statistics of a whole cube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeStats {
    pub actual_min: f64,
    pub actual_max: f64,
    /// Suggested color-scale minimum (5th percentile).
    pub display_min: f64,
    /// Suggested color-scale maximum (95th percentile).
    pub display_max: f64,
    pub mean: f64,
    pub std: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p95: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p99: Option<f64>,
}

impl Default for AmplitudeStats {
    fn default() -> Self {
        Self {
            actual_min: -1.0,
            actual_max: 1.0,
            display_min: -1.0,
            display_max: 1.0,
            mean: 0.0,
            std: 0.0,
            p1: None,
            p5: None,
            p95: None,
            p99: None,
        }
    }
}

/// Real-world orientation of the survey grid.
///
/// Vectors are 2-D `(east, north)` direction cosines of increasing inline and
/// crossline numbers. They need not be orthogonal nor unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SurveyOrientationWire")]
pub struct SurveyOrientation {
    pub inline_vector: [f64; 2],
    pub xline_vector: [f64; 2],
    /// Inline azimuth in degrees clockwise from north.
    pub azimuth_inline: f64,
    /// Crossline azimuth in degrees clockwise from north.
    pub azimuth_xline: f64,
    pub has_coordinates: bool,
}

impl SurveyOrientation {
    /// Builds an orientation from compass azimuths (degrees from north).
    #[must_use]
    pub fn from_azimuths(azimuth_inline: f64, azimuth_xline: f64, has_coordinates: bool) -> Self {
        Self {
            inline_vector: azimuth_to_vector(azimuth_inline).to_array(),
            xline_vector: azimuth_to_vector(azimuth_xline).to_array(),
            azimuth_inline,
            azimuth_xline,
            has_coordinates,
        }
    }

    #[must_use]
    pub fn inline(&self) -> DVec2 {
        DVec2::from_array(self.inline_vector)
    }

    #[must_use]
    pub fn xline(&self) -> DVec2 {
        DVec2::from_array(self.xline_vector)
    }
}

impl Default for SurveyOrientation {
    fn default() -> Self {
        Self::from_azimuths(0.0, 90.0, false)
    }
}

/// Unit `(east, north)` vector for a bearing in degrees.
#[must_use]
pub fn azimuth_to_vector(azimuth_deg: f64) -> DVec2 {
    let (sin, cos) = azimuth_deg.to_radians().sin_cos();
    DVec2::new(sin, cos)
}

/// Accepts both the explicit vector form and the azimuth-only `geometry`
/// object emitted by the upload service.
#[derive(Deserialize)]
struct SurveyOrientationWire {
    #[serde(default)]
    inline_vector: Option<[f64; 2]>,
    #[serde(default)]
    xline_vector: Option<[f64; 2]>,
    #[serde(default, alias = "inline_azimuth")]
    azimuth_inline: Option<f64>,
    #[serde(default, alias = "xline_azimuth")]
    azimuth_xline: Option<f64>,
    #[serde(default)]
    has_coordinates: bool,
}

impl From<SurveyOrientationWire> for SurveyOrientation {
    fn from(wire: SurveyOrientationWire) -> Self {
        let azimuth_inline = wire.azimuth_inline.unwrap_or(0.0);
        let azimuth_xline = wire.azimuth_xline.unwrap_or(90.0);
        let derived = Self::from_azimuths(azimuth_inline, azimuth_xline, wire.has_coordinates);
        Self {
            inline_vector: wire.inline_vector.unwrap_or(derived.inline_vector),
            xline_vector: wire.xline_vector.unwrap_or(derived.xline_vector),
            ..derived
        }
    }
}

/// Immutable description of a loaded cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeInfo {
    /// `[n_inline, n_xline, n_sample]`.
    pub shape: [usize; 3],
    pub inline_range: AxisRange,
    pub xline_range: AxisRange,
    pub sample_range: AxisRange,
    pub amplitude_range: AmplitudeStats,
    #[serde(default, alias = "geometry")]
    pub orientation: SurveyOrientation,
    #[serde(default)]
    pub memory_usage_mb: f64,
}

impl CubeInfo {
    /// Returns the axis range indexed by `kind`.
    #[must_use]
    pub fn axis(&self, kind: SliceKind) -> &AxisRange {
        match kind {
            SliceKind::Inline => &self.inline_range,
            SliceKind::Xline => &self.xline_range,
            SliceKind::Sample => &self.sample_range,
        }
    }

    /// Number of slices available for `kind`.
    #[must_use]
    pub fn len(&self, kind: SliceKind) -> usize {
        self.shape[kind.dim()]
    }

    /// Largest valid slice index for `kind`.
    #[must_use]
    pub fn max_index(&self, kind: SliceKind) -> usize {
        self.len(kind).saturating_sub(1)
    }

    /// Clamps `index` into `[0, shape[dim] - 1]`.
    #[must_use]
    pub fn clamp_index(&self, kind: SliceKind, index: usize) -> usize {
        index.min(self.max_index(kind))
    }

    /// Slice indices at the middle of every axis.
    #[must_use]
    pub fn center_indices(&self) -> SliceIndices {
        SliceIndices {
            inline: self.shape[0] / 2,
            xline: self.shape[1] / 2,
            sample: self.shape[2] / 2,
        }
    }

    /// Plot-space coordinate of the plane a slice at `index` lies in.
    ///
    /// Inline and crossline numbers advance by one per index; the sample
    /// axis may be fractionally spaced and is interpolated.
    #[must_use]
    pub fn slice_position(&self, kind: SliceKind, index: usize) -> f64 {
        match kind {
            SliceKind::Inline => self.inline_range.line_at(index),
            SliceKind::Xline => self.xline_range.line_at(index),
            SliceKind::Sample => self.sample_range.interpolate(index),
        }
    }

    /// Plot-space bounding box `(min, max)` as (inline, crossline, sample).
    #[must_use]
    pub fn bounds(&self) -> (DVec3, DVec3) {
        (
            DVec3::new(self.inline_range.min, self.xline_range.min, self.sample_range.min),
            DVec3::new(self.inline_range.max, self.xline_range.max, self.sample_range.max),
        )
    }

    /// Number of cells in the cube.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.shape.iter().product()
    }
}

/// One index per slice kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SliceIndices {
    pub inline: usize,
    pub xline: usize,
    pub sample: usize,
}

impl SliceIndices {
    pub fn new(inline: usize, xline: usize, sample: usize) -> Self {
        Self {
            inline,
            xline,
            sample,
        }
    }

    #[must_use]
    pub fn get(&self, kind: SliceKind) -> usize {
        match kind {
            SliceKind::Inline => self.inline,
            SliceKind::Xline => self.xline,
            SliceKind::Sample => self.sample,
        }
    }

    /// Returns a copy with the index for `kind` replaced.
    #[must_use]
    pub fn with(mut self, kind: SliceKind, index: usize) -> Self {
        match kind {
            SliceKind::Inline => self.inline = index,
            SliceKind::Xline => self.xline = index,
            SliceKind::Sample => self.sample = index,
        }
        self
    }
}
