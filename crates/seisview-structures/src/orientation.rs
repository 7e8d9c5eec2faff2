//! North indicator drawn in plot space.
//!
//! The survey's inline and crossline axes are arbitrary, possibly skewed
//! directions in the real world. Expressing geographic north in that basis
//! gives the direction to draw in plot (inline, crossline) coordinates.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3, Vec3};

use seisview_core::{CubeInfo, Options, Result, SeisviewError, SurveyOrientation};
use seisview_render::{LineTrace, TextTrace, Trace};

/// Real-world north as an `(east, north)` vector.
pub const NORTH: DVec2 = DVec2::new(0.0, 1.0);

/// Direction drawn when north cannot be resolved: the plot's crossline axis.
pub const FALLBACK_DIRECTION: DVec2 = DVec2::new(0.0, 1.0);

pub const RESOLVED_COLOR: Vec3 = Vec3::new(0.8, 0.1, 0.1);
pub const UNKNOWN_COLOR: Vec3 = Vec3::new(0.55, 0.55, 0.55);

const RING_SEGMENTS: usize = 48;
const WING_ANGLE_DEG: f64 = 30.0;
const WING_FRACTION: f64 = 0.25;

/// Outcome of expressing north in the survey basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NorthResolution {
    /// Unit direction of north in plot (inline, crossline) coordinates.
    Resolved { direction: DVec2 },
    /// Basis vectors are parallel or the survey carries no coordinates.
    Unknown,
}

impl NorthResolution {
    /// Direction to draw; the fallback axis when unresolved.
    pub fn direction(&self) -> DVec2 {
        match self {
            NorthResolution::Resolved { direction } => *direction,
            NorthResolution::Unknown => FALLBACK_DIRECTION,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, NorthResolution::Resolved { .. })
    }
}

/// Solves `north = a * inline + b * xline` for `(a, b)` and normalizes it.
///
/// Fails with [`SeisviewError::DegenerateOrientation`] when `|det| < epsilon`.
pub fn solve_north(inline: DVec2, xline: DVec2, epsilon: f64) -> Result<DVec2> {
    let det = inline.x * xline.y - inline.y * xline.x;
    if det.abs() < epsilon {
        return Err(SeisviewError::DegenerateOrientation { det });
    }

    let a = (NORTH.x * xline.y - NORTH.y * xline.x) / det;
    let b = (inline.x * NORTH.y - inline.y * NORTH.x) / det;
    Ok(DVec2::new(a, b).normalize())
}

/// Resolves north for a survey, falling back when it is not georeferenced.
pub fn resolve_north(orientation: &SurveyOrientation, epsilon: f64) -> NorthResolution {
    if !orientation.has_coordinates {
        log::debug!("survey has no coordinates, north is unknown");
        return NorthResolution::Unknown;
    }
    match solve_north(orientation.inline(), orientation.xline(), epsilon) {
        Ok(direction) => NorthResolution::Resolved { direction },
        Err(err) => {
            log::warn!("north arrow falls back to the crossline axis: {err}");
            NorthResolution::Unknown
        }
    }
}

/// Placement and shape of the arrow for one cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NorthArrow {
    pub resolution: NorthResolution,
    /// Base of the shaft, outside the cube's upper corner.
    pub origin: DVec3,
    pub length: f64,
}

impl NorthArrow {
    pub fn new(info: &CubeInfo, options: &Options) -> Self {
        let resolution = resolve_north(&info.orientation, options.orientation_epsilon);
        let (min, max) = info.bounds();
        let extent = max - min;

        let largest = extent.x.max(extent.y);
        let length = if largest > 0.0 {
            options.arrow_length_fraction * largest
        } else {
            1.0
        };
        let origin = DVec3::new(
            max.x + options.arrow_offset_fraction * extent.x,
            max.y + options.arrow_offset_fraction * extent.y,
            min.z,
        );

        Self {
            resolution,
            origin,
            length,
        }
    }

    pub fn tip(&self) -> DVec3 {
        self.origin + (self.resolution.direction() * self.length).extend(0.0)
    }

    /// Shaft followed by the two wing segments.
    pub fn polylines(&self) -> Vec<Vec<DVec3>> {
        let tip = self.tip();
        let back = -self.resolution.direction();
        let wing = |angle_deg: f64| {
            let dir = DVec2::from_angle(angle_deg.to_radians()).rotate(back);
            tip + (dir * self.length * WING_FRACTION).extend(0.0)
        };
        vec![
            vec![self.origin, tip],
            vec![tip, wing(WING_ANGLE_DEG)],
            vec![tip, wing(-WING_ANGLE_DEG)],
        ]
    }

    /// Closed circle around the arrow base.
    pub fn ring(&self) -> Vec<DVec3> {
        (0..=RING_SEGMENTS)
            .map(|i| {
                let theta = TAU * i as f64 / RING_SEGMENTS as f64;
                let (sin, cos) = theta.sin_cos();
                self.origin + DVec3::new(cos, sin, 0.0) * self.length
            })
            .collect()
    }

    /// Label text; resolved arrows show the inline azimuth.
    pub fn label(&self, orientation: &SurveyOrientation) -> String {
        if self.resolution.is_resolved() {
            format!("N (IL {:.1}°)", orientation.azimuth_inline)
        } else {
            "N?".to_string()
        }
    }

    pub fn color(&self) -> Vec3 {
        if self.resolution.is_resolved() {
            RESOLVED_COLOR
        } else {
            UNKNOWN_COLOR
        }
    }

    /// Arrow, compass ring and label traces.
    pub fn traces(&self, orientation: &SurveyOrientation) -> Vec<Trace> {
        let color = self.color();

        let mut arrow = LineTrace::new("north_arrow", color, 4.0);
        for line in self.polylines() {
            arrow = arrow.with_polyline(line);
        }
        let ring = LineTrace::new("compass_ring", color, 1.5).with_polyline(self.ring());
        let label = TextTrace {
            name: "north_label".to_string(),
            position: self.tip() + (self.resolution.direction() * self.length * 0.15).extend(0.0),
            text: self.label(orientation),
            color,
            size: 14.0,
        };

        vec![Trace::Lines(arrow), Trace::Lines(ring), Trace::Text(label)]
    }
}

/// North indicator traces for `info`.
pub fn north_arrow(info: &CubeInfo, options: &Options) -> Vec<Trace> {
    NorthArrow::new(info, options).traces(&info.orientation)
}
