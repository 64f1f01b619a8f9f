//! Zero-Copy 2-D Reinterpretations of Tensor Storage
//!
//! Kernels that reduce over one axis and broadcast over another work on 2-D
//! reinterpretations of flat row-major buffers: the whole tensor as
//! `[batch, channels * fea_len]`, or one batch element as
//! `[channels, fea_len]`. These helpers compute the addressing for those
//! views from the declared dimensions alone; they never look at element
//! values.

use crate::{Result, TensorError};
use scirs2_core::ndarray::{ArrayView2, ArrayViewMut2};

fn check_matrix_len(operation: &str, len: usize, rows: usize, cols: usize) -> Result<()> {
    if len != rows * cols {
        return Err(TensorError::shape_mismatch(
            operation,
            &format!("{} elements for a [{rows}, {cols}] view", rows * cols),
            &format!("{len}"),
        ));
    }
    Ok(())
}

/// Reinterpret a contiguous buffer as a `[rows, cols]` matrix view.
pub fn matrix_view<T>(data: &[T], rows: usize, cols: usize) -> Result<ArrayView2<'_, T>> {
    check_matrix_len("matrix_view", data.len(), rows, cols)?;
    ArrayView2::from_shape((rows, cols), data).map_err(Into::into)
}

/// Mutable `[rows, cols]` reinterpretation of a contiguous buffer.
pub fn matrix_view_mut<T>(data: &mut [T], rows: usize, cols: usize) -> Result<ArrayViewMut2<'_, T>> {
    check_matrix_len("matrix_view_mut", data.len(), rows, cols)?;
    ArrayViewMut2::from_shape((rows, cols), data).map_err(Into::into)
}

fn check_batch_plane(operation: &str, len: usize, index: usize, rows: usize, cols: usize) -> Result<usize> {
    let plane = rows * cols;
    if plane == 0 || len % plane != 0 {
        return Err(TensorError::shape_mismatch(
            operation,
            &format!("a multiple of {plane} elements for [{rows}, {cols}] planes"),
            &format!("{len}"),
        ));
    }
    let batch = len / plane;
    if index >= batch {
        return Err(TensorError::invalid_index(operation, index, batch));
    }
    Ok(plane)
}

/// Borrow the `[rows, cols]` plane of one batch element from a flat
/// `[batch, rows, cols]` buffer.
pub fn batch_plane<T>(data: &[T], index: usize, rows: usize, cols: usize) -> Result<&[T]> {
    let plane = check_batch_plane("batch_plane", data.len(), index, rows, cols)?;
    Ok(&data[index * plane..(index + 1) * plane])
}

/// Mutable borrow of the `[rows, cols]` plane of one batch element.
pub fn batch_plane_mut<T>(
    data: &mut [T],
    index: usize,
    rows: usize,
    cols: usize,
) -> Result<&mut [T]> {
    let plane = check_batch_plane("batch_plane_mut", data.len(), index, rows, cols)?;
    Ok(&mut data[index * plane..(index + 1) * plane])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_view_roundtrip() {
        let data: Vec<f32> = (0..6).map(|v| v as f32).collect();
        let view = matrix_view(&data, 2, 3).unwrap();
        assert_eq!(view[[0, 0]], 0.0);
        assert_eq!(view[[0, 2]], 2.0);
        assert_eq!(view[[1, 0]], 3.0);
        assert_eq!(view[[1, 2]], 5.0);
    }

    #[test]
    fn test_matrix_view_rejects_wrong_element_count() {
        let data = [1.0f32; 5];
        let err = matrix_view(&data, 2, 3).unwrap_err();
        assert_eq!(err.operation(), "matrix_view");
    }

    #[test]
    fn test_matrix_view_mut_writes_through() {
        let mut data = [0.0f32; 4];
        {
            let mut view = matrix_view_mut(&mut data, 2, 2).unwrap();
            view[[1, 0]] = 7.0;
        }
        assert_eq!(data, [0.0, 0.0, 7.0, 0.0]);
    }

    #[test]
    fn test_batch_plane_selects_one_element() {
        // two batch elements, each a [2, 3] plane
        let data: Vec<f32> = (0..12).map(|v| v as f32).collect();
        assert_eq!(batch_plane(&data, 0, 2, 3).unwrap(), &data[..6]);
        assert_eq!(batch_plane(&data, 1, 2, 3).unwrap(), &data[6..]);
    }

    #[test]
    fn test_batch_plane_rejects_out_of_range_index() {
        let data = [0.0f32; 12];
        let err = batch_plane(&data, 2, 2, 3).unwrap_err();
        match err {
            TensorError::InvalidIndex { index, len, .. } => {
                assert_eq!(index, 2);
                assert_eq!(len, 2);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn test_batch_plane_rejects_non_divisible_buffer() {
        let data = [0.0f32; 11];
        assert!(batch_plane(&data, 0, 2, 3).is_err());
    }
}
