//! Core abstractions for seisview-rs.
//!
//! This crate provides the data model and the pure building blocks shared by
//! the rest of the workspace:
//! - [`CubeInfo`] and the slice-fetch schema ([`SliceResponse`])
//! - Row/column normalization of slice matrices ([`normalize()`])
//! - Amplitude statistics and the quantile-based [`AmplitudeRangeController`]
//! - Survey orientation from trace headers and an in-memory [`SeismicVolume`]
//! - Configuration [`Options`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors and builders return values that are fine to ignore
#![allow(clippy::must_use_candidate)]
// Index/count conversions are bounded by cube dimensions
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod amplitude;
pub mod error;
pub mod geometry;
pub mod normalize;
pub mod options;
pub mod schema;
pub mod stats;
pub mod types;
pub mod volume;

pub use amplitude::{
    quantile_range, AmplitudeDisplayRange, AmplitudeRangeController, BaseRangeMode,
    QuantileWindow, RangePreset,
};
pub use error::{Result, SeisviewError};
pub use geometry::{survey_orientation, TraceHeader};
pub use normalize::normalize;
pub use options::{Options, MISSING_AMPLITUDE};
pub use schema::{parse_upload_response, Matrix, SliceCoordinates, SliceResponse};
pub use stats::{cube_stats, SliceStats};
pub use types::{
    AmplitudeStats, AxisRange, CubeInfo, SliceIndices, SliceKind, SurveyOrientation,
};
pub use volume::SeismicVolume;

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3, Vec3};
