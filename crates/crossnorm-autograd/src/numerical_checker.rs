//! Numerical Gradient Validation
//!
//! Compares the analytic gradient of the normalization kernel against a
//! central-difference approximation:
//!
//! ```text
//! dL/dx_i ≈ [L(x + δ·e_i) - L(x - δ·e_i)] / (2δ)
//! ```
//!
//! with the scalar probe loss `L(x) = sum(grad_output ⊙ channel_norm(x))`,
//! whose input gradient is exactly what the backward kernel returns for
//! that upstream gradient. The comparison is meaningful when all scale
//! entries are equal; with distinct per-channel scales the shipped
//! gradient keeps its unscaled coupling term and diverges from the finite
//! differences (see `test_per_channel_scales_diverge_from_finite_differences`).

use crate::ops::normalization_ops::channel_norm_backward;
use crossnorm_core::ops::channel_norm;
use crossnorm_core::{Result, Tensor, TensorError};
use scirs2_core::num_traits::{Float, FromPrimitive, ToPrimitive};

/// Configuration for numerical gradient checking
#[derive(Debug, Clone)]
pub struct GradientCheckConfig {
    /// Step for the finite-difference perturbation
    pub delta: f64,
    /// Relative tolerance for gradient comparison
    pub rtol: f64,
    /// Absolute tolerance for gradient comparison
    pub atol: f64,
}

impl Default for GradientCheckConfig {
    fn default() -> Self {
        Self {
            delta: 1e-5,
            rtol: 1e-3,
            atol: 1e-5,
        }
    }
}

impl GradientCheckConfig {
    /// Configuration with tighter tolerances, for f64 tensors
    pub fn strict() -> Self {
        Self {
            delta: 1e-6,
            rtol: 1e-6,
            atol: 1e-8,
        }
    }
}

/// Result of gradient checking
#[derive(Debug, Clone)]
pub struct GradientCheckResult {
    /// Whether every element stayed within tolerance
    pub passed: bool,
    /// Maximum absolute error found
    pub max_absolute_error: f64,
    /// Maximum relative error found
    pub max_relative_error: f64,
    /// Number of elements checked
    pub num_elements_checked: usize,
    /// Number of elements outside tolerance
    pub num_failures: usize,
}

impl GradientCheckResult {
    /// Check if the gradient validation passed
    pub fn is_ok(&self) -> bool {
        self.passed
    }
}

fn to_f64<T: ToPrimitive>(value: T, operation: &str) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| TensorError::numerical_error(operation, "value not representable as f64"))
}

/// Probe loss `sum(grad_output ⊙ channel_norm(x))` for a perturbed input.
fn probe_loss<T>(
    data: &[T],
    shape: &[usize],
    scale: &Tensor<T>,
    epsilon: T,
    grad_output: &[T],
) -> Result<f64>
where
    T: Clone + Default + Float + Send + Sync + 'static,
{
    let x = Tensor::from_vec(data.to_vec(), shape)?;
    let y = channel_norm(&x, scale, epsilon)?;
    let y_flat = y.as_slice().ok_or_else(|| {
        TensorError::invalid_shape("probe_loss", "kernel output must be contiguous")
    })?;

    let mut loss = T::zero();
    for (y_val, dy_val) in y_flat.iter().zip(grad_output.iter()) {
        loss = loss + *y_val * *dy_val;
    }
    to_f64(loss, "probe_loss")
}

/// Compare the analytic input gradient of `channel_norm` against central
/// finite differences, element by element.
pub fn check_channel_norm_gradient<T>(
    input: &Tensor<T>,
    scale: &Tensor<T>,
    grad_output: &Tensor<T>,
    epsilon: T,
    config: &GradientCheckConfig,
) -> Result<GradientCheckResult>
where
    T: Clone + Default + Float + FromPrimitive + Send + Sync + 'static,
{
    if config.delta.is_nan() || config.delta <= 0.0 {
        return Err(TensorError::invalid_argument(
            "check_channel_norm_gradient",
            "delta must be positive",
        ));
    }

    let analytic = channel_norm_backward(grad_output, input, scale, epsilon)?;
    let analytic_flat = analytic.as_slice().ok_or_else(|| {
        TensorError::invalid_shape(
            "check_channel_norm_gradient",
            "gradient output must be contiguous",
        )
    })?;
    let base = input.as_slice().ok_or_else(|| {
        TensorError::invalid_shape("check_channel_norm_gradient", "input must be contiguous")
    })?;
    let dy = grad_output.as_slice().ok_or_else(|| {
        TensorError::invalid_shape(
            "check_channel_norm_gradient",
            "upstream gradient must be contiguous",
        )
    })?;
    let shape = input.shape().to_vec();

    let delta = T::from_f64(config.delta).ok_or_else(|| {
        TensorError::numerical_error(
            "check_channel_norm_gradient",
            "delta not representable in the tensor element type",
        )
    })?;

    let mut result = GradientCheckResult {
        passed: true,
        max_absolute_error: 0.0,
        max_relative_error: 0.0,
        num_elements_checked: base.len(),
        num_failures: 0,
    };

    let mut perturbed = base.to_vec();
    for i in 0..base.len() {
        perturbed[i] = base[i] + delta;
        let plus = probe_loss(&perturbed, &shape, scale, epsilon, dy)?;
        perturbed[i] = base[i] - delta;
        let minus = probe_loss(&perturbed, &shape, scale, epsilon, dy)?;
        perturbed[i] = base[i];

        let numeric = (plus - minus) / (2.0 * config.delta);
        let analytic_val = to_f64(analytic_flat[i], "check_channel_norm_gradient")?;

        let abs_err = (analytic_val - numeric).abs();
        let rel_err = abs_err / analytic_val.abs().max(numeric.abs()).max(1e-12);
        result.max_absolute_error = result.max_absolute_error.max(abs_err);
        result.max_relative_error = result.max_relative_error.max(rel_err);
        if abs_err > config.atol && rel_err > config.rtol {
            result.num_failures += 1;
        }
    }

    result.passed = result.num_failures == 0;
    Ok(result)
}
