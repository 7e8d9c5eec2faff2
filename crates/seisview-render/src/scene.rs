//! Scene description: traces plus axis and camera configuration.

use glam::Vec3;
use serde::Serialize;

use seisview_core::{CubeInfo, Options, Result, SliceKind};

use crate::camera::CameraPose;
use crate::trace::{SurfaceTrace, Trace};

/// One plot axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub title: String,
    /// `[start, end]` in drawing order; a reversed axis has `start > end`.
    pub range: [f64; 2],
    pub reversed: bool,
}

impl AxisConfig {
    pub fn new(title: impl Into<String>, min: f64, max: f64, reversed: bool) -> Self {
        let range = if reversed { [max, min] } else { [min, max] };
        Self {
            title: title.into(),
            range,
            reversed,
        }
    }

    /// Lower and upper bound regardless of direction.
    pub fn bounds(&self) -> (f64, f64) {
        let [a, b] = self.range;
        (a.min(b), a.max(b))
    }
}

/// Static layout of the 3-D scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneConfig {
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub z_axis: AxisConfig,
    pub camera: CameraPose,
    pub background: Vec3,
}

impl SceneConfig {
    /// Axes spanning the cube with the camera at its default pose.
    ///
    /// x is inline, y is crossline and z is the sample axis.
    pub fn for_cube(info: &CubeInfo, options: &Options) -> Self {
        let (min, max) = info.bounds();
        Self {
            x_axis: AxisConfig::new(SliceKind::Inline.label(), min.x, max.x, false),
            y_axis: AxisConfig::new(SliceKind::Xline.label(), min.y, max.y, false),
            z_axis: AxisConfig::new(
                SliceKind::Sample.label(),
                min.z,
                max.z,
                options.reverse_sample_axis,
            ),
            camera: CameraPose::from_options(options),
            background: options.background_color,
        }
    }
}

/// Everything the plotting layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub traces: Vec<Trace>,
    pub config: SceneConfig,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            traces: Vec::new(),
            config,
        }
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    /// Finds a trace by name.
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name() == name)
    }

    /// All slice surfaces in the scene.
    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceTrace> {
        self.traces.iter().filter_map(Trace::as_surface)
    }

    /// The surface for `kind`, if that slice is shown.
    pub fn surface(&self, kind: SliceKind) -> Option<&SurfaceTrace> {
        self.surfaces().find(|s| s.kind == kind)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{LineTrace, TextTrace};
    use glam::DVec3;
    use seisview_core::{AmplitudeStats, AxisRange, SurveyOrientation};

    fn cube() -> CubeInfo {
        CubeInfo {
            shape: [11, 21, 101],
            inline_range: AxisRange::new(100.0, 110.0, 11),
            xline_range: AxisRange::new(200.0, 220.0, 21),
            sample_range: AxisRange::new(0.0, 400.0, 101),
            amplitude_range: AmplitudeStats::default(),
            orientation: SurveyOrientation::default(),
            memory_usage_mb: 0.0,
        }
    }

    #[test]
    fn test_config_for_cube() {
        let config = SceneConfig::for_cube(&cube(), &Options::default());
        assert_eq!(config.x_axis.range, [100.0, 110.0]);
        assert_eq!(config.y_axis.title, "Crossline");
        assert!(config.z_axis.reversed);
        assert_eq!(config.z_axis.range, [400.0, 0.0]);
        assert_eq!(config.z_axis.bounds(), (0.0, 400.0));
        assert_eq!(config.background, Vec3::ONE);
    }

    #[test]
    fn test_scene_lookup_and_json() {
        let mut scene = Scene::new(SceneConfig::for_cube(&cube(), &Options::default()));
        scene.push(Trace::Lines(LineTrace::new("outline", Vec3::ZERO, 2.0)));
        scene.push(Trace::Text(TextTrace {
            name: "north_label".into(),
            position: DVec3::ZERO,
            text: "N".into(),
            color: Vec3::ZERO,
            size: 12.0,
        }));

        assert!(scene.trace("outline").is_some());
        assert!(scene.surface(SliceKind::Inline).is_none());
        assert_eq!(scene.surfaces().count(), 0);

        let json: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        assert_eq!(json["traces"].as_array().unwrap().len(), 2);
        assert_eq!(json["config"]["z_axis"]["reversed"], true);
    }
}
