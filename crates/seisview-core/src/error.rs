//! Error types for seisview-rs.

use thiserror::Error;

use crate::types::SliceKind;

/// The main error type for seisview-rs operations.
#[derive(Error, Debug)]
pub enum SeisviewError {
    /// A slice payload is missing its data or coordinates, or is not a
    /// rectangular 2-D array.
    #[error("invalid slice shape: {0}")]
    InvalidSliceShape(String),

    /// An upload or slice fetch failed.
    #[error("fetch failed: {0}")]
    FetchFailure(String),

    /// The upload endpoint answered with an error payload.
    #[error("upload rejected: {0}")]
    UploadRejected(String),

    /// The survey basis vectors are parallel (or nearly so).
    #[error("degenerate survey orientation (determinant {det:e})")]
    DegenerateOrientation { det: f64 },

    /// A slice index lies outside of the cube.
    #[error("index {index} out of bounds for {kind} (max: {max})")]
    IndexOutOfBounds {
        kind: SliceKind,
        index: usize,
        max: usize,
    },

    /// No cube is currently loaded.
    #[error("no cube data loaded")]
    NoCubeLoaded,

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SeisviewError {
    /// Shorthand for an [`SeisviewError::InvalidSliceShape`] error on a `kind` slice.
    pub fn invalid_shape(kind: SliceKind, reason: impl std::fmt::Display) -> Self {
        Self::InvalidSliceShape(format!("{kind} slice: {reason}"))
    }
}

/// A specialized Result type for seisview-rs operations.
pub type Result<T> = std::result::Result<T, SeisviewError>;
