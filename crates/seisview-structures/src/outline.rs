//! Wireframe box around the cube.

use glam::{DVec3, Vec3};

use seisview_core::CubeInfo;
use seisview_render::LineTrace;

pub const OUTLINE_COLOR: Vec3 = Vec3::new(0.2, 0.2, 0.2);

/// Corners and edges of the axis-aligned box `[min, max]`.
pub fn bbox_wireframe(min: DVec3, max: DVec3) -> (Vec<DVec3>, Vec<[usize; 2]>) {
    let nodes = vec![
        DVec3::new(min.x, min.y, min.z), // 0
        DVec3::new(max.x, min.y, min.z), // 1
        DVec3::new(max.x, max.y, min.z), // 2
        DVec3::new(min.x, max.y, min.z), // 3
        DVec3::new(min.x, min.y, max.z), // 4
        DVec3::new(max.x, min.y, max.z), // 5
        DVec3::new(max.x, max.y, max.z), // 6
        DVec3::new(min.x, max.y, max.z), // 7
    ];

    let edges = vec![
        // first sample
        [0, 1],
        [1, 2],
        [2, 3],
        [3, 0],
        // last sample
        [4, 5],
        [5, 6],
        [6, 7],
        [7, 4],
        // along the sample axis
        [0, 4],
        [1, 5],
        [2, 6],
        [3, 7],
    ];

    (nodes, edges)
}

/// The cube outline as one line trace with a polyline per edge.
pub fn cube_outline(info: &CubeInfo) -> LineTrace {
    let (min, max) = info.bounds();
    let (nodes, edges) = bbox_wireframe(min, max);
    edges.iter().fold(
        LineTrace::new("cube_outline", OUTLINE_COLOR, 2.0),
        |trace, &[a, b]| trace.with_polyline(vec![nodes[a], nodes[b]]),
    )
}
