//! Camera pose as reported by the plotting engine.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use seisview_core::Options;

/// Which side of the horizontal plane the camera looks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewSide {
    /// Eye at or above the horizontal plane.
    #[default]
    Above,
    /// Eye below the horizontal plane.
    Below,
}

/// A camera pose in the plot's normalized scene space.
///
/// `eye` is expressed relative to the scene center, as plotting engines
/// report it, so the azimuth is read directly from its x/y components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: DVec3,
    pub center: DVec3,
    pub up: DVec3,
}

impl CameraPose {
    pub fn new(eye: DVec3, center: DVec3, up: DVec3) -> Self {
        Self { eye, center, up }
    }

    /// The default pose configured in `options`.
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.camera_eye, options.camera_center, options.camera_up)
    }

    /// Horizontal angle of the eye, in degrees, counter-clockwise from +x.
    pub fn azimuth_deg(&self) -> f64 {
        self.eye.y.atan2(self.eye.x).to_degrees()
    }

    /// Angle of the eye above the horizontal plane, in degrees.
    pub fn elevation_deg(&self) -> f64 {
        self.eye.z.atan2(self.eye.x.hypot(self.eye.y)).to_degrees()
    }

    pub fn view_side(&self) -> ViewSide {
        if self.elevation_deg() >= 0.0 {
            ViewSide::Above
        } else {
            ViewSide::Below
        }
    }

    /// Distance from the eye to the center.
    pub fn distance(&self) -> f64 {
        (self.eye - self.center).length()
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}
