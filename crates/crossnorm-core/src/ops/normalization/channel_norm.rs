//! Cross-Channel L2 Normalization
//!
//! For input `[batch, channels, height, width]` and scale `[channels]`:
//!
//! ```text
//! out[n, c, p] = scale[c] * input[n, c, p] / sqrt(sum_c' input[n, c', p]^2 + epsilon)
//! ```
//!
//! where `p` ranges over the `height * width` flattened spatial positions.
//! Batch elements are independent and are processed in parallel once the
//! tensor is large enough to pay for the fan-out.

use crate::tensor::TensorStorage;
use crate::tensor_view::{batch_plane, batch_plane_mut};
use crate::{Result, Tensor, TensorError};
use rayon::prelude::*;
use scirs2_core::ndarray::{ArrayD, IxDyn};
use scirs2_core::numeric::Float;

/// Element count above which batch planes are processed on the rayon pool.
const PARALLEL_THRESHOLD: usize = 10_000;

/// Validate a `[batch, channels, height, width]` input against a
/// `[channels]` scale vector and a non-negative epsilon; returns
/// `(batch, channels, fea_len)` with `fea_len = height * width`.
///
/// Shared by the forward kernel and the gradient kernel, which must agree
/// on what a well-formed input looks like.
pub fn nchw_dims<T>(
    operation: &str,
    input_shape: &[usize],
    scale_shape: &[usize],
    epsilon: T,
) -> Result<(usize, usize, usize)>
where
    T: Float,
{
    if input_shape.len() != 4 {
        return Err(TensorError::InvalidShape {
            operation: operation.to_string(),
            reason: format!(
                "expected 4D [batch, channels, height, width] input, got {}D",
                input_shape.len()
            ),
            shape: Some(input_shape.to_vec()),
            context: None,
        });
    }
    let (batch, channels) = (input_shape[0], input_shape[1]);
    let fea_len = input_shape[2] * input_shape[3];
    if input_shape.iter().any(|&d| d == 0) {
        return Err(TensorError::InvalidShape {
            operation: operation.to_string(),
            reason: "all input dimensions must be positive".to_string(),
            shape: Some(input_shape.to_vec()),
            context: None,
        });
    }
    if scale_shape != [channels] {
        return Err(TensorError::shape_mismatch(
            operation,
            &format!("scale shape [{channels}]"),
            &format!("{scale_shape:?}"),
        ));
    }
    if epsilon < T::zero() {
        return Err(TensorError::invalid_argument(
            operation,
            "epsilon must not be negative",
        ));
    }
    Ok((batch, channels, fea_len))
}

/// Cross-channel L2 normalization with learned per-channel scale.
///
/// Input shape: `[batch, channels, height, width]`
/// Scale shape: `[channels]`
///
/// Writes a freshly allocated output; the inputs are never mutated. All
/// shape checking happens before any arithmetic, so a failed call performs
/// no partial work.
pub fn channel_norm<T>(input: &Tensor<T>, scale: &Tensor<T>, epsilon: T) -> Result<Tensor<T>>
where
    T: Clone + Default + Float + Send + Sync + 'static,
{
    match (&input.storage, &scale.storage) {
        (TensorStorage::Cpu(input_arr), TensorStorage::Cpu(scale_arr)) => {
            let (batch, channels, fea_len) =
                nchw_dims("channel_norm", input_arr.shape(), scale_arr.shape(), epsilon)?;
            let plane = channels * fea_len;

            let input_flat = input_arr.as_slice().ok_or_else(|| {
                TensorError::invalid_shape("channel_norm", "input storage must be contiguous")
            })?;
            let scale_flat = scale_arr.as_slice().ok_or_else(|| {
                TensorError::invalid_shape("channel_norm", "scale storage must be contiguous")
            })?;

            let mut out_data = vec![T::zero(); input_flat.len()];

            if batch > 1 && input_flat.len() >= PARALLEL_THRESHOLD {
                out_data
                    .par_chunks_mut(plane)
                    .zip(input_flat.par_chunks(plane))
                    .for_each(|(out_plane, in_plane)| {
                        normalize_plane(in_plane, scale_flat, epsilon, channels, fea_len, out_plane)
                    });
            } else {
                for n in 0..batch {
                    let in_plane = batch_plane(input_flat, n, channels, fea_len)?;
                    let out_plane = batch_plane_mut(&mut out_data, n, channels, fea_len)?;
                    normalize_plane(in_plane, scale_flat, epsilon, channels, fea_len, out_plane);
                }
            }

            let array = ArrayD::from_shape_vec(IxDyn(input_arr.shape()), out_data)?;
            Ok(Tensor::from_array(array))
        }
    }
}

/// Normalize one `[channels, fea_len]` plane.
///
/// The inverse norm per spatial position is the only scratch allocation and
/// lives just for this plane.
fn normalize_plane<T>(
    x: &[T],
    scale: &[T],
    epsilon: T,
    channels: usize,
    fea_len: usize,
    out: &mut [T],
) where
    T: Float,
{
    let mut inv_norm = vec![T::zero(); fea_len];
    for (p, inv) in inv_norm.iter_mut().enumerate() {
        let mut sumsq = T::zero();
        for c in 0..channels {
            let v = x[c * fea_len + p];
            sumsq = sumsq + v * v;
        }
        *inv = T::one() / (sumsq + epsilon).sqrt();
    }
    for c in 0..channels {
        let s = scale[c];
        for p in 0..fea_len {
            let idx = c * fea_len + p;
            out[idx] = x[idx] * inv_norm[p] * s;
        }
    }
}
