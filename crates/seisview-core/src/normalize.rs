//! Row/column orientation correction for slice matrices.
//!
//! Slice payloads do not promise whether rows run along `coordinates.y` or
//! `coordinates.x`. Mesh builders expect `matrix[i][j]` to sit at
//! `(coords_a[j], coords_b[i])`; [`normalize`] detects the swapped layout and
//! transposes it. A matrix matching neither layout is passed through as-is.

use std::borrow::Cow;

use crate::error::{Result, SeisviewError};

/// Orientation of a matrix relative to the expected `(rows = b, cols = a)` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Rows run along `coords_a` and columns along `coords_b`.
    Swapped,
    /// Anything else, including the expected layout and mismatched shapes.
    AsIs,
}

/// Classifies a `rows x cols` matrix against the two coordinate lengths.
///
/// The swapped test is checked first, so square matrices with equal
/// coordinate lengths are always reported as [`Layout::Swapped`].
#[must_use]
pub fn detect_layout(rows: usize, cols: usize, len_a: usize, len_b: usize) -> Layout {
    if rows == len_a && cols == len_b {
        Layout::Swapped
    } else {
        Layout::AsIs
    }
}

/// Returns the matrix indexed as `[b][a]`.
///
/// Fails with [`SeisviewError::InvalidSliceShape`] when the matrix has no
/// first row; the caller should skip the slice.
pub fn normalize<'a, T: Clone>(
    data: &'a [Vec<T>],
    coords_a: &[f64],
    coords_b: &[f64],
) -> Result<Cow<'a, [Vec<T>]>> {
    let Some(first) = data.first() else {
        return Err(SeisviewError::InvalidSliceShape(
            "matrix has no first row".to_string(),
        ));
    };

    match detect_layout(data.len(), first.len(), coords_a.len(), coords_b.len()) {
        Layout::Swapped => {
            log::debug!(
                "transposing {}x{} slice matrix to match coordinates",
                data.len(),
                first.len()
            );
            Ok(Cow::Owned(transpose(data)))
        }
        Layout::AsIs => Ok(Cow::Borrowed(data)),
    }
}

/// Transposes a rectangular matrix using the width of its first row.
///
/// Cells missing from short rows are skipped, so ragged input yields ragged
/// output instead of a panic.
#[must_use]
pub fn transpose<T: Clone>(data: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = data.first().map_or(0, Vec::len);
    (0..width)
        .map(|col| data.iter().filter_map(|row| row.get(col).cloned()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn axis(n: usize) -> Vec<f64> {
        (0..n).map(|v| v as f64).collect()
    }

    #[test]
    fn test_transposes_swapped_layout() {
        // 3 rows along a, 2 columns along b
        let data = vec![vec![1, 2], vec![3, 4], vec![5, 6]];
        let out = normalize(&data, &axis(3), &axis(2)).unwrap();
        assert_eq!(out.into_owned(), vec![vec![1, 3, 5], vec![2, 4, 6]]);
    }

    #[test]
    fn test_expected_layout_is_borrowed() {
        let data = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let out = normalize(&data, &axis(3), &axis(2)).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_mismatched_shape_passes_through() {
        let data = vec![vec![1.0; 4]; 5];
        let out = normalize(&data, &axis(7), &axis(9)).unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].len(), 4);
    }

    #[test]
    fn test_empty_matrix_is_invalid() {
        let data: Vec<Vec<f64>> = Vec::new();
        let err = normalize(&data, &axis(1), &axis(1)).unwrap_err();
        assert!(matches!(err, SeisviewError::InvalidSliceShape(_)));
    }

    #[test]
    fn test_square_is_treated_as_swapped() {
        assert_eq!(detect_layout(4, 4, 4, 4), Layout::Swapped);
        assert_eq!(detect_layout(4, 5, 5, 4), Layout::AsIs);
    }

    fn matrix_strategy() -> impl Strategy<Value = Vec<Vec<i32>>> {
        (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(prop::collection::vec(any::<i32>(), cols), rows)
        })
    }

    proptest! {
        #[test]
        fn prop_swapped_input_is_transposed(m in matrix_strategy()) {
            let a = axis(m.len());
            let b = axis(m[0].len());
            let out = normalize(&m, &a, &b).unwrap();
            prop_assert_eq!(out.len(), b.len());
            prop_assert_eq!(out[0].len(), a.len());
            for (i, row) in m.iter().enumerate() {
                for (j, v) in row.iter().enumerate() {
                    prop_assert_eq!(&out[j][i], v);
                }
            }
        }

        #[test]
        fn prop_reapplying_with_swapped_expectations_restores(m in matrix_strategy()) {
            let a = axis(m.len());
            let b = axis(m[0].len());
            let once = normalize(&m, &a, &b).unwrap().into_owned();
            let twice = normalize(&once, &b, &a).unwrap().into_owned();
            prop_assert_eq!(twice, m);
        }

        #[test]
        fn prop_normalized_output_is_stable(m in matrix_strategy()) {
            prop_assume!(m.len() != m[0].len());
            let a = axis(m.len());
            let b = axis(m[0].len());
            let once = normalize(&m, &a, &b).unwrap().into_owned();
            let again = normalize(&once, &a, &b).unwrap().into_owned();
            prop_assert_eq!(again, once);
        }
    }
}
