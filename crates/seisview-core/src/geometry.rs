//! Survey orientation from georeferenced trace headers.
//!
//! The azimuth of an axis is taken between the two traces at either end of
//! that axis on the first line where both ends carry coordinates.

use std::collections::HashMap;

use crate::types::SurveyOrientation;

/// Minimum number of georeferenced traces needed to trust the geometry.
pub const MIN_GEOREFERENCED_TRACES: usize = 4;

/// Position of one trace in survey and map coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceHeader {
    pub inline: i64,
    pub xline: i64,
    /// Easting; zero means "not georeferenced".
    pub x: f64,
    /// Northing; zero means "not georeferenced".
    pub y: f64,
}

impl TraceHeader {
    pub fn new(inline: i64, xline: i64, x: f64, y: f64) -> Self {
        Self { inline, xline, x, y }
    }

    fn is_georeferenced(&self) -> bool {
        self.x != 0.0 && self.y != 0.0
    }
}

/// Bearing from `from` to `to` in degrees clockwise from north, in `[0, 360)`.
#[must_use]
pub fn bearing_deg(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    dx.atan2(dy).to_degrees().rem_euclid(360.0)
}

/// Derives inline/crossline azimuths from trace headers.
///
/// Falls back to `(0°, 90°)` without coordinates when fewer than
/// [`MIN_GEOREFERENCED_TRACES`] headers carry map coordinates.
#[must_use]
pub fn survey_orientation(headers: &[TraceHeader]) -> SurveyOrientation {
    let coords: HashMap<(i64, i64), (f64, f64)> = headers
        .iter()
        .filter(|h| h.is_georeferenced())
        .map(|h| ((h.inline, h.xline), (h.x, h.y)))
        .collect();

    if coords.len() < MIN_GEOREFERENCED_TRACES {
        log::warn!(
            "only {} georeferenced traces; survey orientation unknown",
            coords.len()
        );
        return SurveyOrientation::default();
    }

    let mut inlines: Vec<i64> = headers.iter().map(|h| h.inline).collect();
    let mut xlines: Vec<i64> = headers.iter().map(|h| h.xline).collect();
    inlines.sort_unstable();
    inlines.dedup();
    xlines.sort_unstable();
    xlines.dedup();

    let (Some(&min_il), Some(&max_il)) = (inlines.first(), inlines.last()) else {
        return SurveyOrientation::default();
    };
    let (Some(&min_xl), Some(&max_xl)) = (xlines.first(), xlines.last()) else {
        return SurveyOrientation::default();
    };

    // Lines are scanned from the lowest number, so the corner trace wins when present.
    let inline_pair = xlines
        .iter()
        .find_map(|&xl| Some((*coords.get(&(min_il, xl))?, *coords.get(&(max_il, xl))?)));
    let xline_pair = inlines
        .iter()
        .find_map(|&il| Some((*coords.get(&(il, min_xl))?, *coords.get(&(il, max_xl))?)));

    let azimuth_inline = inline_pair.map_or(0.0, |(a, b)| bearing_deg(a, b));
    let azimuth_xline = xline_pair.map_or(90.0, |(a, b)| bearing_deg(a, b));

    log::info!(
        "survey geometry: inline azimuth {azimuth_inline:.1}°, crossline azimuth {azimuth_xline:.1}° from north"
    );
    SurveyOrientation::from_azimuths(azimuth_inline, azimuth_xline, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A 3x3 grid rotated so inlines advance north-east and crosslines south-east.
    fn rotated_grid() -> Vec<TraceHeader> {
        let mut headers = Vec::new();
        for il in 0..3i32 {
            for xl in 0..3i32 {
                let x = 1000.0 + 10.0 * f64::from(il) + 10.0 * f64::from(xl);
                let y = 5000.0 + 10.0 * f64::from(il) - 10.0 * f64::from(xl);
                headers.push(TraceHeader::new(100 + i64::from(il), 200 + i64::from(xl), x, y));
            }
        }
        headers
    }

    #[test]
    fn test_bearing() {
        assert!((bearing_deg((0.0, 0.0), (0.0, 1.0)) - 0.0).abs() < 1e-9);
        assert!((bearing_deg((0.0, 0.0), (1.0, 0.0)) - 90.0).abs() < 1e-9);
        assert!((bearing_deg((0.0, 0.0), (-1.0, 0.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_survey() {
        let orientation = survey_orientation(&rotated_grid());
        assert!(orientation.has_coordinates);
        assert!((orientation.azimuth_inline - 45.0).abs() < 1e-9);
        assert!((orientation.azimuth_xline - 135.0).abs() < 1e-9);
        let v = orientation.inline();
        assert!((v.x - v.y).abs() < 1e-9);
    }

    #[test]
    fn test_missing_corner_uses_other_line() {
        let headers: Vec<_> = rotated_grid()
            .into_iter()
            .map(|mut h| {
                if h.inline == 100 && h.xline == 200 {
                    h.x = 0.0;
                    h.y = 0.0;
                }
                h
            })
            .collect();
        let orientation = survey_orientation(&headers);
        assert!(orientation.has_coordinates);
        assert!((orientation.azimuth_inline - 45.0).abs() < 1e-9);
        assert!((orientation.azimuth_xline - 135.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_coordinates() {
        let headers = vec![
            TraceHeader::new(1, 1, 10.0, 10.0),
            TraceHeader::new(1, 2, 0.0, 0.0),
            TraceHeader::new(2, 1, 20.0, 10.0),
        ];
        let orientation = survey_orientation(&headers);
        assert!(!orientation.has_coordinates);
        assert_eq!(orientation.azimuth_inline, 0.0);
        assert_eq!(orientation.azimuth_xline, 90.0);
    }
}
