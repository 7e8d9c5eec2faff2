//! Surface geometry for inline, crossline and sample slices.
//!
//! Every cell of a slice matrix becomes one vertex placed at its true
//! (inline, crossline, sample) position. The slice's own axis is held at the
//! position implied by its index; the other two vary per cell and come from
//! the response's coordinate arrays.

use glam::DVec3;

use seisview_core::{
    normalize, AmplitudeDisplayRange, CubeInfo, Options, SliceKind, SliceResponse,
    MISSING_AMPLITUDE,
};
use seisview_render::{ColorMap, SurfaceTrace};

/// The two axes a slice of `kind` spans, as `(columns, rows)`.
///
/// Columns follow `coordinates.x` and rows follow `coordinates.y`.
pub fn grid_axes(kind: SliceKind) -> (SliceKind, SliceKind) {
    match kind {
        SliceKind::Inline => (SliceKind::Xline, SliceKind::Sample),
        SliceKind::Xline => (SliceKind::Inline, SliceKind::Sample),
        SliceKind::Sample => (SliceKind::Inline, SliceKind::Xline),
    }
}

/// Plot-space position of a cell with column coordinate `a` and row
/// coordinate `b` on a slice of `kind` lying at `plane`.
pub fn place(kind: SliceKind, plane: f64, a: f64, b: f64) -> DVec3 {
    match kind {
        SliceKind::Inline => DVec3::new(plane, a, b),
        SliceKind::Xline => DVec3::new(a, plane, b),
        SliceKind::Sample => DVec3::new(a, b, plane),
    }
}

/// Builds slice surfaces for one cube and color range.
#[derive(Debug, Clone)]
pub struct SliceMeshBuilder<'a> {
    info: &'a CubeInfo,
    range: AmplitudeDisplayRange,
    colorscale: String,
    colorscale_stops: Vec<(f32, String)>,
    missing_amplitude: f64,
}

impl<'a> SliceMeshBuilder<'a> {
    pub fn new(info: &'a CubeInfo, range: AmplitudeDisplayRange) -> Self {
        Self {
            info,
            range,
            colorscale: "seismic".to_string(),
            colorscale_stops: Vec::new(),
            missing_amplitude: MISSING_AMPLITUDE,
        }
    }

    /// A builder using the color map and missing-cell value from `options`.
    pub fn from_options(
        info: &'a CubeInfo,
        range: AmplitudeDisplayRange,
        options: &Options,
    ) -> Self {
        Self::new(info, range)
            .with_colorscale(&options.color_map)
            .with_missing_amplitude(options.missing_amplitude)
    }

    /// Names the color map without resolving its stops.
    #[must_use]
    pub fn with_colorscale(mut self, name: &str) -> Self {
        self.colorscale = name.to_string();
        self.colorscale_stops.clear();
        self
    }

    /// Uses `map`, embedding its stops in every surface.
    #[must_use]
    pub fn with_color_map(mut self, map: &ColorMap) -> Self {
        self.colorscale.clone_from(&map.name);
        self.colorscale_stops = map.stops();
        self
    }

    #[must_use]
    pub fn with_missing_amplitude(mut self, value: f64) -> Self {
        self.missing_amplitude = value;
        self
    }

    /// Builds the surface for `response` at slice `index`.
    ///
    /// Returns `None` when the matrix cannot be normalized; the caller leaves
    /// that slice out of the scene. Cells missing from the matrix, or null,
    /// get the missing-amplitude sentinel.
    pub fn build(&self, response: &SliceResponse, index: usize) -> Option<SurfaceTrace> {
        let kind = response.kind();
        let coords = response.coordinates();
        let matrix = match normalize(response.data(), &coords.x, &coords.y) {
            Ok(matrix) => matrix,
            Err(err) => {
                log::warn!("skipping {kind} slice {index}: {err}");
                return None;
            }
        };

        let plane = self.info.slice_position(kind, index);
        let (col_axis, row_axis) = grid_axes(kind);
        let rows = coords.y.len();
        let cols = coords.x.len();

        let mut x = Vec::with_capacity(rows);
        let mut y = Vec::with_capacity(rows);
        let mut z = Vec::with_capacity(rows);
        let mut color = Vec::with_capacity(rows);
        let mut hover_text = Vec::with_capacity(rows);

        for (i, &b) in coords.y.iter().enumerate() {
            let mut xr = Vec::with_capacity(cols);
            let mut yr = Vec::with_capacity(cols);
            let mut zr = Vec::with_capacity(cols);
            let mut cr = Vec::with_capacity(cols);
            let mut hr = Vec::with_capacity(cols);

            for (j, &a) in coords.x.iter().enumerate() {
                let p = place(kind, plane, a, b);
                let amplitude = matrix
                    .get(i)
                    .and_then(|row| row.get(j))
                    .copied()
                    .flatten()
                    .unwrap_or(self.missing_amplitude);

                xr.push(p.x);
                yr.push(p.y);
                zr.push(p.z);
                cr.push(amplitude);
                hr.push(format!(
                    "{} {}<br>{}: {}<br>{}: {}<br>Amplitude: {:.6}",
                    kind.label(),
                    plane,
                    col_axis.label(),
                    a,
                    row_axis.label(),
                    b,
                    amplitude
                ));
            }

            x.push(xr);
            y.push(yr);
            z.push(zr);
            color.push(cr);
            hover_text.push(hr);
        }

        Some(SurfaceTrace {
            name: kind.as_str().to_string(),
            kind,
            x,
            y,
            z,
            color,
            hover_text,
            colorscale: self.colorscale.clone(),
            colorscale_stops: self.colorscale_stops.clone(),
            cmin: self.range.vmin,
            cmax: self.range.vmax,
            show_scale: kind == SliceKind::Sample,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use seisview_core::{AmplitudeStats, AxisRange, SliceCoordinates, SurveyOrientation};

    fn cube() -> CubeInfo {
        CubeInfo {
            shape: [5, 4, 11],
            inline_range: AxisRange::new(100.0, 104.0, 5),
            xline_range: AxisRange::new(200.0, 203.0, 4),
            sample_range: AxisRange::new(0.0, 40.0, 11),
            amplitude_range: AmplitudeStats::default(),
            orientation: SurveyOrientation::default(),
            memory_usage_mb: 0.0,
        }
    }

    fn coords(x: Vec<f64>, y: Vec<f64>) -> SliceCoordinates {
        SliceCoordinates { x, y }
    }

    #[test]
    fn test_inline_slice_placement() {
        let info = cube();
        // 2 samples x 3 crosslines, already row = sample
        let response = SliceResponse::new(
            SliceKind::Inline,
            vec![
                vec![Some(0.1), Some(0.2), Some(0.3)],
                vec![Some(0.4), None, Some(0.6)],
            ],
            coords(vec![200.0, 201.0, 202.0], vec![0.0, 4.0]),
        )
        .unwrap();

        let builder = SliceMeshBuilder::new(&info, AmplitudeDisplayRange::new(-0.5, 0.5));
        let trace = builder.build(&response, 2).unwrap();

        assert_eq!(trace.dims(), (2, 3));
        assert!(trace.is_consistent());
        assert_eq!(trace.position(1, 2), DVec3::new(102.0, 202.0, 4.0));
        assert!(trace.x.iter().flatten().all(|&v| v == 102.0));
        assert_eq!(trace.color[1][1], MISSING_AMPLITUDE);
        assert_eq!(trace.color[0][2], 0.3);
        assert_eq!((trace.cmin, trace.cmax), (-0.5, 0.5));
        assert!(!trace.show_scale);
        assert_eq!(
            trace.hover_text[0][0],
            "Inline 102<br>Crossline: 200<br>Sample: 0<br>Amplitude: 0.100000"
        );
    }

    #[test]
    fn test_swapped_matrix_is_normalized() {
        let info = cube();
        // rows follow coordinates.x (inline), columns follow coordinates.y (crossline)
        let response = SliceResponse::from_dense(
            SliceKind::Sample,
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            coords(vec![100.0, 101.0, 102.0], vec![200.0, 201.0]),
        )
        .unwrap();

        let trace = SliceMeshBuilder::new(&info, AmplitudeDisplayRange::default())
            .build(&response, 10)
            .unwrap();

        assert_eq!(trace.dims(), (2, 3));
        assert_eq!(trace.color, vec![vec![1.0, 3.0, 5.0], vec![2.0, 4.0, 6.0]]);
        assert_eq!(trace.position(1, 0), DVec3::new(100.0, 201.0, 40.0));
        assert!(trace.show_scale);
    }

    #[test]
    fn test_xline_plane_uses_line_number() {
        let info = cube();
        let response = SliceResponse::from_dense(
            SliceKind::Xline,
            vec![vec![0.0, 0.0]],
            coords(vec![100.0, 101.0], vec![8.0]),
        )
        .unwrap();
        let trace = SliceMeshBuilder::new(&info, AmplitudeDisplayRange::default())
            .build(&response, 3)
            .unwrap();
        assert!(trace.y.iter().flatten().all(|&v| v == 203.0));
        assert_eq!(trace.z[0][0], 8.0);
    }

    #[test]
    fn test_options_colorscale() {
        let info = cube();
        let options = Options {
            color_map: "greys".into(),
            missing_amplitude: -5.0,
            ..Options::default()
        };
        let response = SliceResponse::new(
            SliceKind::Xline,
            vec![vec![None, Some(1.0)]],
            coords(vec![100.0, 101.0], vec![0.0]),
        )
        .unwrap();
        let trace = SliceMeshBuilder::from_options(&info, AmplitudeDisplayRange::default(), &options)
            .build(&response, 0)
            .unwrap();
        assert_eq!(trace.colorscale, "greys");
        assert!(trace.colorscale_stops.is_empty());
        assert_eq!(trace.color[0][0], -5.0);
    }

    #[test]
    fn test_color_map_stops_embedded() {
        let info = cube();
        let registry = seisview_render::ColorMapRegistry::new();
        let response = SliceResponse::new(
            SliceKind::Sample,
            vec![vec![Some(1.0), Some(2.0)]],
            coords(vec![100.0], vec![200.0, 201.0]),
        )
        .unwrap();
        let trace = SliceMeshBuilder::new(&info, AmplitudeDisplayRange::default())
            .with_color_map(registry.get_or_default("greys"))
            .build(&response, 0)
            .unwrap();
        assert_eq!(trace.colorscale, "greys");
        assert_eq!(trace.colorscale_stops.first(), Some(&(0.0, "rgb(0,0,0)".to_string())));
        assert_eq!(trace.colorscale_stops.last(), Some(&(1.0, "rgb(255,255,255)".to_string())));
    }

    fn sparse_slice() -> impl Strategy<Value = (Vec<Vec<Option<f64>>>, usize, usize)> {
        (1usize..6, 1usize..6).prop_flat_map(|(rows, cols)| {
            (
                prop::collection::vec(
                    prop::collection::vec(prop::option::of(-10.0f64..10.0), cols),
                    rows,
                ),
                Just(rows),
                Just(cols),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_missing_cells_get_sentinel((data, rows, cols) in sparse_slice()) {
            // Non-square coordinates so the layout is never ambiguous.
            prop_assume!(rows != cols);
            let info = cube();
            let x: Vec<f64> = (0..cols).map(|j| 200.0 + j as f64).collect();
            let y: Vec<f64> = (0..rows).map(|i| i as f64).collect();

            let response = SliceResponse::new(SliceKind::Inline, data.clone(), coords(x, y)).unwrap();
            let trace = SliceMeshBuilder::new(&info, AmplitudeDisplayRange::default())
                .build(&response, 0)
                .unwrap();

            prop_assert!(trace.is_consistent());
            for (i, row) in data.iter().enumerate() {
                for (j, cell) in row.iter().enumerate() {
                    let expected = cell.unwrap_or(MISSING_AMPLITUDE);
                    prop_assert_eq!(trace.color[i][j], expected);
                }
            }
        }

        #[test]
        fn prop_mismatched_coordinates_never_panic(
            (data, _rows, _cols) in sparse_slice(),
            nx in 1usize..8,
            ny in 1usize..8,
        ) {
            let info = cube();
            let x: Vec<f64> = (0..nx).map(|j| j as f64).collect();
            let y: Vec<f64> = (0..ny).map(|i| i as f64).collect();
            let response = SliceResponse::new(SliceKind::Sample, data, coords(x, y)).unwrap();
            let trace = SliceMeshBuilder::new(&info, AmplitudeDisplayRange::default())
                .build(&response, 0)
                .unwrap();
            prop_assert_eq!(trace.dims(), (ny, nx));
            prop_assert!(trace.is_consistent());
        }
    }
}
