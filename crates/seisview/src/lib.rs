//! seisview-rs: a geometry and orientation engine for orthogonal seismic slices.
//!
//! Three mutually orthogonal amplitude slices (inline, crossline, sample) of a
//! 3-D seismic cube are placed in one shared frame, together with the cube
//! outline and a north arrow resolved from the survey's inline/crossline
//! basis. A compass follows the camera as the user orbits.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Instant;
//! use seisview::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!     let mut viewer = Viewer::default();
//!
//!     // Reply from `POST /api/upload`
//!     let body = std::fs::read_to_string("upload.json")?;
//!     for request in viewer.load_upload_response(true, &body, Instant::now())? {
//!         // GET request.path(), then hand the body back
//!         let body = std::fs::read_to_string(format!("{}.json", request.kind))?;
//!         viewer.apply_slice(&request, SliceResponse::from_json(request.kind, &body));
//!     }
//!
//!     if let Some(scene) = viewer.scene() {
//!         println!("{}", scene.to_json()?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Timing
//!
//! Nothing blocks or spawns threads. The embedding event loop calls
//! [`Viewer::tick`] with the current time; slider debouncing, the compass
//! settle delay and the compass poll all fire from there.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod compass;
pub mod init;
pub mod scheduler;
pub mod source;
pub mod state;
pub mod task;
pub mod viewer;

pub use compass::{angle_delta, compass_angle, CameraCompassSync, CompassReading};
pub use init::{init, init_logging};
pub use scheduler::{Debounce, SliceUpdateScheduler};
pub use source::{FetchRequest, SliceSource, VolumeSource, UPLOAD_PATH};
pub use state::{Layer, LoadedSlice, ViewerState, Visibility};
pub use task::PeriodicTask;
pub use viewer::Viewer;

// Re-export core types
pub use seisview_core::{
    AmplitudeDisplayRange, AmplitudeRangeController, AmplitudeStats, AxisRange, BaseRangeMode,
    CubeInfo, DVec2, DVec3, Options, QuantileWindow, RangePreset, Result, SeismicVolume,
    SeisviewError, SliceCoordinates, SliceIndices, SliceKind, SliceResponse, SurveyOrientation,
    TraceHeader, Vec3,
};

// Re-export render types
pub use seisview_render::{
    CameraPose, ColorMap, ColorMapRegistry, LineTrace, Scene, SceneConfig, SurfaceTrace,
    TextTrace, Trace, ViewSide,
};

// Re-export structures
pub use seisview_structures::{NorthArrow, NorthResolution, SliceMeshBuilder};
