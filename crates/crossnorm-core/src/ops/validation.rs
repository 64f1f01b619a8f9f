//! Opt-In Input Validation
//!
//! The kernels follow IEEE semantics and propagate NaN/Inf through the
//! arithmetic without crashing. Callers that would rather fail fast on
//! malformed activations run [`ensure_finite`] before invoking a kernel.

use crate::tensor::TensorStorage;
use crate::{Result, Tensor, TensorError};
use scirs2_core::numeric::Float;

/// Reject tensors containing NaN or infinite values.
pub fn ensure_finite<T>(tensor: &Tensor<T>, operation: &str) -> Result<()>
where
    T: Float,
{
    match &tensor.storage {
        TensorStorage::Cpu(arr) => {
            for (i, v) in arr.iter().enumerate() {
                if !v.is_finite() {
                    return Err(TensorError::numerical_error(
                        operation,
                        &format!("non-finite value at flat index {i}"),
                    ));
                }
            }
            Ok(())
        }
    }
}
