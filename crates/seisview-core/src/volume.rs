//! In-memory seismic cube.
//!
//! Holds amplitudes as `[inline, xline, sample]` and serves every slice with
//! rows along `coordinates.x`: inline slices as `xline x sample`, crossline
//! slices as `inline x sample` and sample slices as `inline x xline`. That is
//! the swapped layout, which the normalizer transposes for square slices too.

use std::collections::HashMap;

use ndarray::{Array3, ArrayView2, Axis};

use crate::error::{Result, SeisviewError};
use crate::geometry::{survey_orientation, TraceHeader};
use crate::schema::{Matrix, SliceCoordinates, SliceResponse};
use crate::stats::{cube_stats, SliceStats};
use crate::types::{AmplitudeStats, AxisRange, CubeInfo, SliceKind, SurveyOrientation};

/// A fully loaded amplitude cube with its axis coordinates.
#[derive(Debug, Clone)]
pub struct SeismicVolume {
    data: Array3<f32>,
    inline_coords: Vec<f64>,
    xline_coords: Vec<f64>,
    sample_coords: Vec<f64>,
    orientation: SurveyOrientation,
    stats: AmplitudeStats,
}

impl SeismicVolume {
    /// Wraps a cube. Non-finite amplitudes are replaced with zero.
    pub fn new(
        mut data: Array3<f32>,
        inline_coords: Vec<f64>,
        xline_coords: Vec<f64>,
        sample_coords: Vec<f64>,
    ) -> Result<Self> {
        let (n_il, n_xl, n_s) = data.dim();
        for (expected, actual) in [
            (n_il, inline_coords.len()),
            (n_xl, xline_coords.len()),
            (n_s, sample_coords.len()),
        ] {
            if expected != actual {
                return Err(SeisviewError::SizeMismatch { expected, actual });
            }
        }

        data.mapv_inplace(|v| if v.is_finite() { v } else { 0.0 });
        let stats = cube_stats(data.iter().map(|&v| f64::from(v))).unwrap_or_default();

        Ok(Self {
            data,
            inline_coords,
            xline_coords,
            sample_coords,
            orientation: SurveyOrientation::default(),
            stats,
        })
    }

    /// Assembles a cube from individual traces.
    ///
    /// Traces whose header has a zero inline or crossline number are laid
    /// out on a synthetic square grid in file order. Missing cells stay zero
    /// and traces longer than `sample_coords` are truncated.
    pub fn from_traces(
        headers: &[TraceHeader],
        traces: &[Vec<f32>],
        sample_coords: Vec<f64>,
    ) -> Result<Self> {
        if headers.len() != traces.len() {
            return Err(SeisviewError::SizeMismatch {
                expected: headers.len(),
                actual: traces.len(),
            });
        }

        let n_traces = headers.len();
        let grid = ((n_traces as f64).sqrt() as usize).max(1);
        let placed: Vec<TraceHeader> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if h.inline != 0 && h.xline != 0 {
                    *h
                } else {
                    TraceHeader::new((i / grid + 1) as i64, (i % grid + 1) as i64, 0.0, 0.0)
                }
            })
            .collect();

        let mut inlines: Vec<i64> = placed.iter().map(|h| h.inline).collect();
        let mut xlines: Vec<i64> = placed.iter().map(|h| h.xline).collect();
        inlines.sort_unstable();
        inlines.dedup();
        xlines.sort_unstable();
        xlines.dedup();

        let inline_index: HashMap<i64, usize> =
            inlines.iter().enumerate().map(|(i, &il)| (il, i)).collect();
        let xline_index: HashMap<i64, usize> =
            xlines.iter().enumerate().map(|(i, &xl)| (xl, i)).collect();

        let n_samples = sample_coords.len();
        let mut data = Array3::<f32>::zeros((inlines.len(), xlines.len(), n_samples));
        for (header, trace) in placed.iter().zip(traces) {
            let (Some(&i), Some(&j)) = (inline_index.get(&header.inline), xline_index.get(&header.xline))
            else {
                continue;
            };
            for (k, &v) in trace.iter().take(n_samples).enumerate() {
                data[[i, j, k]] = v;
            }
        }

        let orientation = survey_orientation(&placed);
        let volume = Self::new(
            data,
            inlines.iter().map(|&v| v as f64).collect(),
            xlines.iter().map(|&v| v as f64).collect(),
            sample_coords,
        )?
        .with_orientation(orientation);

        log::info!(
            "assembled cube {:?} from {n_traces} traces ({:.1} MB)",
            volume.shape(),
            volume.memory_usage_mb()
        );
        Ok(volume)
    }

    /// Sets the survey orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: SurveyOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// `[n_inline, n_xline, n_sample]`.
    pub fn shape(&self) -> [usize; 3] {
        let (a, b, c) = self.data.dim();
        [a, b, c]
    }

    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    pub fn stats(&self) -> &AmplitudeStats {
        &self.stats
    }

    pub fn memory_usage_mb(&self) -> f64 {
        (self.data.len() * std::mem::size_of::<f32>()) as f64 / (1024.0 * 1024.0)
    }

    fn coords(&self, kind: SliceKind) -> &[f64] {
        match kind {
            SliceKind::Inline => &self.inline_coords,
            SliceKind::Xline => &self.xline_coords,
            SliceKind::Sample => &self.sample_coords,
        }
    }

    fn axis_range(&self, kind: SliceKind) -> AxisRange {
        let coords = self.coords(kind);
        let min = coords.iter().copied().fold(f64::INFINITY, f64::min);
        let max = coords.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if coords.is_empty() {
            AxisRange::new(0.0, 0.0, 0)
        } else {
            AxisRange::new(min, max, coords.len())
        }
    }

    /// Describes this cube.
    pub fn cube_info(&self) -> CubeInfo {
        CubeInfo {
            shape: self.shape(),
            inline_range: self.axis_range(SliceKind::Inline),
            xline_range: self.axis_range(SliceKind::Xline),
            sample_range: self.axis_range(SliceKind::Sample),
            amplitude_range: self.stats,
            orientation: self.orientation,
            memory_usage_mb: self.memory_usage_mb(),
        }
    }

    /// Extracts one slice with its coordinates and statistics.
    pub fn slice(&self, kind: SliceKind, index: usize) -> Result<SliceResponse> {
        let len = self.shape()[kind.dim()];
        if index >= len {
            return Err(SeisviewError::IndexOutOfBounds {
                kind,
                index,
                max: len.saturating_sub(1),
            });
        }

        let plane = self.data.index_axis(Axis(kind.dim()), index);
        let (matrix, coordinates) = match kind {
            SliceKind::Inline => (
                to_matrix(plane.view()),
                SliceCoordinates {
                    x: self.xline_coords.clone(),
                    y: self.sample_coords.clone(),
                },
            ),
            SliceKind::Xline => (
                to_matrix(plane.view()),
                SliceCoordinates {
                    x: self.inline_coords.clone(),
                    y: self.sample_coords.clone(),
                },
            ),
            SliceKind::Sample => (
                to_matrix(plane.view()),
                SliceCoordinates {
                    x: self.inline_coords.clone(),
                    y: self.xline_coords.clone(),
                },
            ),
        };

        let stats = SliceStats::from_values(plane.iter().map(|&v| f64::from(v)));
        let response = SliceResponse::new(kind, matrix, coordinates)?;
        Ok(match stats {
            Some(stats) => response.with_stats(stats),
            None => response,
        })
    }
}

fn to_matrix(view: ArrayView2<'_, f32>) -> Matrix {
    view.rows()
        .into_iter()
        .map(|row| row.iter().map(|&v| Some(f64::from(v))).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Amplitude encodes its own position: `il * 100 + xl * 10 + s`.
    fn coded_volume() -> SeismicVolume {
        let data = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 100 + j * 10 + k) as f32);
        SeismicVolume::new(
            data,
            vec![10.0, 11.0],
            vec![20.0, 21.0, 22.0],
            vec![0.0, 4.0, 8.0, 12.0],
        )
        .unwrap()
    }

    #[test]
    fn test_inline_slice_layout() {
        let slice = coded_volume().slice(SliceKind::Inline, 1).unwrap();
        // rows = crosslines, columns = samples
        assert_eq!(slice.dims(), (3, 4));
        assert_eq!(slice.coordinates().x, vec![20.0, 21.0, 22.0]);
        assert_eq!(slice.data()[2][3], Some(123.0));
    }

    #[test]
    fn test_xline_slice_layout() {
        let slice = coded_volume().slice(SliceKind::Xline, 2).unwrap();
        assert_eq!(slice.dims(), (2, 4));
        assert_eq!(slice.coordinates().x, vec![10.0, 11.0]);
        assert_eq!(slice.data()[1][1], Some(121.0));
    }

    #[test]
    fn test_sample_slice_is_inline_by_xline() {
        let slice = coded_volume().slice(SliceKind::Sample, 3).unwrap();
        assert_eq!(slice.dims(), (2, 3));
        assert_eq!(slice.coordinates().y, vec![20.0, 21.0, 22.0]);
        assert_eq!(slice.data()[1][2], Some(123.0));
        let stats = slice.amplitude_stats().unwrap();
        assert_eq!(stats.min, 3.0);
        assert_eq!(stats.max, 123.0);
    }

    #[test]
    fn test_square_slices_use_swapped_layout() {
        let data = Array3::from_shape_fn((3, 3, 3), |(i, j, k)| (i * 100 + j * 10 + k) as f32);
        let axis = vec![0.0, 1.0, 2.0];
        let volume = SeismicVolume::new(data, axis.clone(), axis.clone(), axis).unwrap();

        for kind in SliceKind::ALL {
            let slice = volume.slice(kind, 1).unwrap();
            let (rows, cols) = slice.dims();
            assert_eq!(
                crate::normalize::detect_layout(rows, cols, 3, 3),
                crate::normalize::Layout::Swapped
            );
        }
        // row = crossline 2, column = sample 0
        let inline = volume.slice(SliceKind::Inline, 1).unwrap();
        assert_eq!(inline.data()[2][0], Some(120.0));
    }

    #[test]
    fn test_out_of_bounds() {
        let err = coded_volume().slice(SliceKind::Sample, 4).unwrap_err();
        assert!(matches!(
            err,
            SeisviewError::IndexOutOfBounds { kind: SliceKind::Sample, index: 4, max: 3 }
        ));
    }

    #[test]
    fn test_non_finite_zeroed() {
        let mut data = Array3::<f32>::ones((1, 1, 3));
        data[[0, 0, 1]] = f32::NAN;
        data[[0, 0, 2]] = f32::INFINITY;
        let volume = SeismicVolume::new(data, vec![1.0], vec![1.0], vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(volume.data()[[0, 0, 1]], 0.0);
        assert_eq!(volume.data()[[0, 0, 2]], 0.0);
        assert_eq!(volume.stats().actual_max, 1.0);
    }

    #[test]
    fn test_coordinate_mismatch() {
        let data = Array3::<f32>::zeros((2, 2, 2));
        let err = SeismicVolume::new(data, vec![1.0], vec![1.0, 2.0], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, SeisviewError::SizeMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_cube_info() {
        let info = coded_volume().cube_info();
        assert_eq!(info.shape, [2, 3, 4]);
        assert_eq!(info.inline_range, AxisRange::new(10.0, 11.0, 2));
        assert_eq!(info.sample_range, AxisRange::new(0.0, 12.0, 4));
        assert_eq!(info.amplitude_range.actual_max, 123.0);
        assert!(!info.orientation.has_coordinates);
    }

    #[test]
    fn test_from_traces() {
        let headers = vec![
            TraceHeader::new(5, 7, 100.0, 100.0),
            TraceHeader::new(5, 8, 100.0, 110.0),
            TraceHeader::new(6, 7, 110.0, 100.0),
            TraceHeader::new(6, 8, 110.0, 110.0),
        ];
        let traces = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0], vec![7.0, 8.0, 9.0]];
        let volume = SeismicVolume::from_traces(&headers, &traces, vec![0.0, 2.0]).unwrap();
        assert_eq!(volume.shape(), [2, 2, 2]);
        assert_eq!(volume.data()[[1, 1, 1]], 8.0);
        let info = volume.cube_info();
        assert_eq!(info.inline_range, AxisRange::new(5.0, 6.0, 2));
        assert!(info.orientation.has_coordinates);
        assert!((info.orientation.azimuth_inline - 90.0).abs() < 1e-9);
        assert!(info.orientation.azimuth_xline.abs() < 1e-9);
    }

    #[test]
    fn test_from_traces_without_line_numbers() {
        let headers = vec![TraceHeader::new(0, 0, 0.0, 0.0); 4];
        let traces = vec![vec![1.0]; 4];
        let volume = SeismicVolume::from_traces(&headers, &traces, vec![0.0]).unwrap();
        assert_eq!(volume.shape(), [2, 2, 1]);
    }
}
