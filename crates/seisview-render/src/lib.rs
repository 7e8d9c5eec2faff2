//! Renderer-facing output for seisview-rs.
//!
//! This crate turns core data into plain, serializable scene descriptions:
//! - Color maps and the [`ColorMapRegistry`]
//! - Surface, line and text [`Trace`]s
//! - Camera pose and [`SceneConfig`]
//!
//! Drawing is left to whichever plotting library consumes the [`Scene`].

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod camera;
pub mod color_maps;
pub mod scene;
pub mod trace;

pub use camera::{CameraPose, ViewSide};
pub use color_maps::{ColorMap, ColorMapRegistry};
pub use scene::{AxisConfig, Scene, SceneConfig};
pub use trace::{LineTrace, SurfaceTrace, TextTrace, Trace};
