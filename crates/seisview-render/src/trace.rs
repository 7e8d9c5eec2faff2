//! Renderable traces handed to the plotting layer.
//!
//! A trace is plain data: positions in plot space (inline, crossline,
//! sample) plus styling. The rendering library decides how to draw it.

use glam::{DVec3, Vec3};
use serde::Serialize;

use seisview_core::SliceKind;

/// Anything the scene can contain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Surface(SurfaceTrace),
    Lines(LineTrace),
    Text(TextTrace),
}

impl Trace {
    /// Returns the trace name.
    pub fn name(&self) -> &str {
        match self {
            Trace::Surface(t) => &t.name,
            Trace::Lines(t) => &t.name,
            Trace::Text(t) => &t.name,
        }
    }

    pub fn as_surface(&self) -> Option<&SurfaceTrace> {
        match self {
            Trace::Surface(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_lines(&self) -> Option<&LineTrace> {
        match self {
            Trace::Lines(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextTrace> {
        match self {
            Trace::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// A colored surface grid for one slice.
///
/// `x`, `y`, `z`, `color` and `hover_text` all share the same `rows x cols`
/// shape; cell `[i][j]` is one vertex of the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceTrace {
    pub name: String,
    pub kind: SliceKind,
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
    /// Amplitude per vertex, used for color mapping.
    pub color: Vec<Vec<f64>>,
    pub hover_text: Vec<Vec<String>>,
    /// Name of the color map.
    pub colorscale: String,
    /// `(position, "rgb(r,g,b)")` stops of the color map; empty when only
    /// the name is known.
    pub colorscale_stops: Vec<(f32, String)>,
    pub cmin: f64,
    pub cmax: f64,
    /// Whether this surface draws the color bar.
    pub show_scale: bool,
}

impl SurfaceTrace {
    /// `(rows, cols)` of the vertex grid.
    pub fn dims(&self) -> (usize, usize) {
        (self.x.len(), self.x.first().map_or(0, Vec::len))
    }

    /// Whether all per-vertex grids share the same shape.
    pub fn is_consistent(&self) -> bool {
        let (rows, cols) = self.dims();
        has_shape(&self.x, rows, cols)
            && has_shape(&self.y, rows, cols)
            && has_shape(&self.z, rows, cols)
            && has_shape(&self.color, rows, cols)
            && has_shape(&self.hover_text, rows, cols)
    }

    /// Vertex position at `[row][col]`.
    pub fn position(&self, row: usize, col: usize) -> DVec3 {
        DVec3::new(self.x[row][col], self.y[row][col], self.z[row][col])
    }
}

fn has_shape<T>(grid: &[Vec<T>], rows: usize, cols: usize) -> bool {
    grid.len() == rows && grid.iter().all(|row| row.len() == cols)
}

/// One or more 3-D polylines drawn with a single style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub polylines: Vec<Vec<DVec3>>,
    pub color: Vec3,
    pub width: f32,
}

impl LineTrace {
    pub fn new(name: impl Into<String>, color: Vec3, width: f32) -> Self {
        Self {
            name: name.into(),
            polylines: Vec::new(),
            color,
            width,
        }
    }

    /// Appends a polyline.
    #[must_use]
    pub fn with_polyline(mut self, points: Vec<DVec3>) -> Self {
        self.polylines.push(points);
        self
    }

    /// Total number of line segments.
    pub fn segment_count(&self) -> usize {
        self.polylines
            .iter()
            .map(|p| p.len().saturating_sub(1))
            .sum()
    }
}

/// A text label anchored in 3-D.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextTrace {
    pub name: String,
    pub position: DVec3,
    pub text: String,
    pub color: Vec3,
    pub size: f32,
}
