//! Gradients for Normalization Operations
//!
//! Backward pass for cross-channel L2 normalization. For each spatial
//! position `p` of a batch element, with `norm[p] = sqrt(sum_c x[c,p]^2 +
//! epsilon)` and `dot[p] = sum_c x[c,p] * dy[c,p]`:
//!
//! ```text
//! dx[c, p] = scale[c] / norm[p] * (dy[c, p] - x[c, p] * dot[p] / norm[p]^2)
//! ```
//!
//! The coupling term reduces raw `x * dy`; scale enters exactly once,
//! through the final per-channel multiply.

use crossnorm_core::ops::normalization::channel_norm::nchw_dims;
use crossnorm_core::tensor::TensorStorage;
use crossnorm_core::tensor_view::{batch_plane, batch_plane_mut};
use crossnorm_core::{Result, Tensor, TensorError};
use rayon::prelude::*;
use scirs2_core::ndarray::{ArrayD, IxDyn};
use scirs2_core::num_traits::Float;

/// Element count above which batch planes are processed on the rayon pool.
const PARALLEL_THRESHOLD: usize = 10_000;

/// Backward pass for cross-channel L2 normalization.
///
/// Inputs are the upstream gradient, the original forward input, and the
/// per-channel scale; the per-location norm is recomputed here, so no state
/// from the forward call is needed. Returns the gradient with respect to
/// the input, in a freshly allocated tensor of the input's shape.
pub fn channel_norm_backward<T>(
    grad_output: &Tensor<T>,
    input: &Tensor<T>,
    scale: &Tensor<T>,
    epsilon: T,
) -> Result<Tensor<T>>
where
    T: Clone + Default + Float + Send + Sync + 'static,
{
    match (&grad_output.storage, &input.storage, &scale.storage) {
        (
            TensorStorage::Cpu(grad_arr),
            TensorStorage::Cpu(input_arr),
            TensorStorage::Cpu(scale_arr),
        ) => {
            let (batch, channels, fea_len) = nchw_dims(
                "channel_norm_backward",
                input_arr.shape(),
                scale_arr.shape(),
                epsilon,
            )?;
            if grad_arr.shape() != input_arr.shape() {
                return Err(TensorError::shape_mismatch(
                    "channel_norm_backward",
                    &format!("gradient shape {:?}", input_arr.shape()),
                    &format!("{:?}", grad_arr.shape()),
                ));
            }
            let plane = channels * fea_len;

            let grad_flat = grad_arr.as_slice().ok_or_else(|| {
                TensorError::invalid_shape(
                    "channel_norm_backward",
                    "gradient storage must be contiguous",
                )
            })?;
            let input_flat = input_arr.as_slice().ok_or_else(|| {
                TensorError::invalid_shape(
                    "channel_norm_backward",
                    "input storage must be contiguous",
                )
            })?;
            let scale_flat = scale_arr.as_slice().ok_or_else(|| {
                TensorError::invalid_shape(
                    "channel_norm_backward",
                    "scale storage must be contiguous",
                )
            })?;

            let mut grad_input = vec![T::zero(); input_flat.len()];

            if batch > 1 && input_flat.len() >= PARALLEL_THRESHOLD {
                grad_input
                    .par_chunks_mut(plane)
                    .zip(input_flat.par_chunks(plane).zip(grad_flat.par_chunks(plane)))
                    .for_each(|(dx_plane, (x_plane, dy_plane))| {
                        grad_plane(
                            dy_plane, x_plane, scale_flat, epsilon, channels, fea_len, dx_plane,
                        )
                    });
            } else {
                for n in 0..batch {
                    let dy_plane = batch_plane(grad_flat, n, channels, fea_len)?;
                    let x_plane = batch_plane(input_flat, n, channels, fea_len)?;
                    let dx_plane = batch_plane_mut(&mut grad_input, n, channels, fea_len)?;
                    grad_plane(
                        dy_plane, x_plane, scale_flat, epsilon, channels, fea_len, dx_plane,
                    );
                }
            }

            let array = ArrayD::from_shape_vec(IxDyn(input_arr.shape()), grad_input)?;
            Ok(Tensor::from_array(array))
        }
    }
}

/// Input gradient for one `[channels, fea_len]` plane.
///
/// Both channel-axis reductions run before any write to `dx`, then the
/// broadcasts apply in the fixed order norm-square division, subtraction
/// from `dy`, norm division, per-channel scale.
fn grad_plane<T>(
    dy: &[T],
    x: &[T],
    scale: &[T],
    epsilon: T,
    channels: usize,
    fea_len: usize,
    dx: &mut [T],
) where
    T: Float,
{
    for p in 0..fea_len {
        let mut sumsq = T::zero();
        let mut dot = T::zero();
        for c in 0..channels {
            let idx = c * fea_len + p;
            let xv = x[idx];
            sumsq = sumsq + xv * xv;
            dot = dot + xv * dy[idx];
        }
        let norm = (sumsq + epsilon).sqrt();
        let norm_sq = norm * norm;
        for c in 0..channels {
            let idx = c * fea_len + p;
            let coupled = x[idx] * dot / norm_sq;
            dx[idx] = (dy[idx] - coupled) / norm * scale[c];
        }
    }
}
