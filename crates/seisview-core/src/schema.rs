//! Validated wire schema for the upload and slice-fetch endpoints.
//!
//! Payloads are checked once, here, so geometry code downstream can rely on a
//! non-empty rectangular matrix and present coordinate arrays.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeisviewError};
use crate::stats::SliceStats;
use crate::types::{CubeInfo, SliceKind};

/// A 2-D amplitude matrix; `None` marks a null cell.
pub type Matrix = Vec<Vec<Option<f64>>>;

/// Coordinate arrays accompanying a slice payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceCoordinates {
    /// Values along the horizontal plot axis of the slice.
    pub x: Vec<f64>,
    /// Values along the vertical plot axis of the slice.
    pub y: Vec<f64>,
}

/// A slice payload that passed shape validation.
///
/// The matrix is rectangular and non-empty, but its row/column orientation
/// relative to `coordinates` is not guaranteed; see [`crate::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliceResponse {
    kind: SliceKind,
    data: Matrix,
    coordinates: SliceCoordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    amplitude_stats: Option<SliceStats>,
}

#[derive(Deserialize)]
struct RawSliceResponse {
    #[serde(default)]
    data: Option<Matrix>,
    #[serde(default)]
    coordinates: Option<RawCoordinates>,
    #[serde(default)]
    amplitude_stats: Option<SliceStats>,
}

#[derive(Deserialize)]
struct RawCoordinates {
    #[serde(default)]
    x: Option<Vec<f64>>,
    #[serde(default)]
    y: Option<Vec<f64>>,
}

impl SliceResponse {
    /// Validates a slice payload.
    ///
    /// Rejects an empty matrix, empty or ragged rows, and empty coordinate
    /// arrays with [`SeisviewError::InvalidSliceShape`].
    pub fn new(kind: SliceKind, data: Matrix, coordinates: SliceCoordinates) -> Result<Self> {
        let Some(first) = data.first() else {
            return Err(SeisviewError::invalid_shape(kind, "data has no rows"));
        };
        let width = first.len();
        if width == 0 {
            return Err(SeisviewError::invalid_shape(kind, "first row is empty"));
        }
        if let Some((row, cells)) = data.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SeisviewError::invalid_shape(
                kind,
                format!("row {row} has {} cells, expected {width}", cells.len()),
            ));
        }
        if coordinates.x.is_empty() || coordinates.y.is_empty() {
            return Err(SeisviewError::invalid_shape(kind, "empty coordinate array"));
        }

        Ok(Self {
            kind,
            data,
            coordinates,
            amplitude_stats: None,
        })
    }

    /// Builds a response from dense values without null cells.
    pub fn from_dense(
        kind: SliceKind,
        rows: Vec<Vec<f64>>,
        coordinates: SliceCoordinates,
    ) -> Result<Self> {
        let data = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::new(kind, data, coordinates)
    }

    /// Parses and validates a `GET /api/slice/{kind}/{index}` body.
    pub fn from_json(kind: SliceKind, body: &str) -> Result<Self> {
        let raw: RawSliceResponse = serde_json::from_str(body)?;
        let data = raw
            .data
            .ok_or_else(|| SeisviewError::invalid_shape(kind, "missing `data`"))?;
        let coordinates = raw
            .coordinates
            .ok_or_else(|| SeisviewError::invalid_shape(kind, "missing `coordinates`"))?;
        let (Some(x), Some(y)) = (coordinates.x, coordinates.y) else {
            return Err(SeisviewError::invalid_shape(kind, "missing coordinate axis"));
        };
        let mut response = Self::new(kind, data, SliceCoordinates { x, y })?;
        response.amplitude_stats = raw.amplitude_stats;
        Ok(response)
    }

    /// Attaches per-slice amplitude statistics.
    #[must_use]
    pub fn with_stats(mut self, stats: SliceStats) -> Self {
        self.amplitude_stats = Some(stats);
        self
    }

    pub fn kind(&self) -> SliceKind {
        self.kind
    }

    pub fn data(&self) -> &Matrix {
        &self.data
    }

    pub fn coordinates(&self) -> &SliceCoordinates {
        &self.coordinates
    }

    pub fn amplitude_stats(&self) -> Option<&SliceStats> {
        self.amplitude_stats.as_ref()
    }

    /// `(rows, columns)` of the matrix as delivered.
    pub fn dims(&self) -> (usize, usize) {
        (self.data.len(), self.data[0].len())
    }
}

#[derive(Deserialize)]
struct RawUploadResponse {
    #[serde(default)]
    cube_info: Option<CubeInfo>,
    #[serde(default)]
    error: Option<String>,
}

/// Parses a `POST /api/upload` reply.
///
/// `success` is whether the HTTP status was 2xx. Any `error` payload, a
/// non-2xx status, or a missing `cube_info` aborts the load. A non-2xx reply
/// whose body is not JSON fails with [`SeisviewError::FetchFailure`].
pub fn parse_upload_response(success: bool, body: &str) -> Result<CubeInfo> {
    if !success {
        let error = serde_json::from_str::<RawUploadResponse>(body)
            .ok()
            .and_then(|raw| raw.error);
        return Err(match error {
            Some(error) => SeisviewError::UploadRejected(error),
            None => SeisviewError::FetchFailure(
                "upload returned a non-success status".to_string(),
            ),
        });
    }

    let raw: RawUploadResponse = serde_json::from_str(body)?;
    if let Some(error) = raw.error {
        return Err(SeisviewError::UploadRejected(error));
    }
    raw.cube_info
        .ok_or_else(|| SeisviewError::UploadRejected("response carries no cube_info".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(x: usize, y: usize) -> SliceCoordinates {
        SliceCoordinates {
            x: (0..x).map(|v| v as f64).collect(),
            y: (0..y).map(|v| v as f64).collect(),
        }
    }

    #[test]
    fn test_from_json_with_nulls() {
        let body = r#"{"data": [[1.0, null], [3.5, -2]],
                       "coordinates": {"x": [10, 11], "y": [0.0, 4.0]},
                       "amplitude_stats": {"min": -2, "max": 3.5, "mean": 0.8, "std": 2.0}}"#;
        let response = SliceResponse::from_json(SliceKind::Inline, body).unwrap();
        assert_eq!(response.dims(), (2, 2));
        assert_eq!(response.data()[0][1], None);
        assert_eq!(response.data()[1][1], Some(-2.0));
        assert_eq!(response.coordinates().x, vec![10.0, 11.0]);
        assert_eq!(response.amplitude_stats().map(|s| s.max), Some(3.5));
    }

    #[test]
    fn test_missing_data_is_invalid_shape() {
        let body = r#"{"coordinates": {"x": [1], "y": [1]}}"#;
        let err = SliceResponse::from_json(SliceKind::Sample, body).unwrap_err();
        assert!(matches!(err, SeisviewError::InvalidSliceShape(_)));
    }

    #[test]
    fn test_missing_coordinates_is_invalid_shape() {
        let body = r#"{"data": [[1.0]]}"#;
        let err = SliceResponse::from_json(SliceKind::Xline, body).unwrap_err();
        assert!(matches!(err, SeisviewError::InvalidSliceShape(_)));

        let body = r#"{"data": [[1.0]], "coordinates": {"x": [1.0]}}"#;
        let err = SliceResponse::from_json(SliceKind::Xline, body).unwrap_err();
        assert!(matches!(err, SeisviewError::InvalidSliceShape(_)));
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        assert!(SliceResponse::new(SliceKind::Inline, vec![], coords(1, 1)).is_err());
        assert!(SliceResponse::new(SliceKind::Inline, vec![vec![]], coords(1, 1)).is_err());

        let ragged = vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0)]];
        let err = SliceResponse::new(SliceKind::Inline, ragged, coords(2, 2)).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_malformed_json() {
        let err = SliceResponse::from_json(SliceKind::Inline, "{not json").unwrap_err();
        assert!(matches!(err, SeisviewError::JsonError(_)));
    }

    #[test]
    fn test_upload_error_payload() {
        let err = parse_upload_response(false, r#"{"error": "No SEGY files found"}"#).unwrap_err();
        assert!(matches!(err, SeisviewError::UploadRejected(ref m) if m.contains("SEGY")));

        let err = parse_upload_response(false, "{}").unwrap_err();
        assert!(matches!(err, SeisviewError::FetchFailure(_)));

        let err = parse_upload_response(true, r#"{"message": "ok"}"#).unwrap_err();
        assert!(matches!(err, SeisviewError::UploadRejected(_)));
    }

    #[test]
    fn test_upload_failure_with_html_body() {
        let body = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        let err = parse_upload_response(false, body).unwrap_err();
        assert!(matches!(err, SeisviewError::FetchFailure(_)));

        // a 2xx reply that is not JSON is still a parse error
        let err = parse_upload_response(true, body).unwrap_err();
        assert!(matches!(err, SeisviewError::JsonError(_)));
    }
}
