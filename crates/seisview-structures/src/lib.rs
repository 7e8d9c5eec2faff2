//! Scene structures for seisview-rs.
//!
//! This crate turns cube metadata and slice payloads into traces:
//! - Slice surfaces ([`SliceMeshBuilder`])
//! - The cube outline
//! - The north arrow ([`NorthArrow`])

// Index and coordinate conversions are bounded by slice sizes
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod orientation;
pub mod outline;
pub mod slice_mesh;

pub use orientation::{north_arrow, resolve_north, solve_north, NorthArrow, NorthResolution};
pub use outline::{bbox_wireframe, cube_outline};
pub use slice_mesh::SliceMeshBuilder;
