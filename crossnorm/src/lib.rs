//! # crossnorm: cross-channel L2 normalization for NCHW feature maps
//!
//! At every spatial location of a `[batch, channels, height, width]`
//! tensor, the channel column is divided by its L2 norm (stabilized by an
//! additive epsilon) and rescaled by a learned per-channel factor. The
//! forward kernel lives in `crossnorm-core`, the matching input-gradient
//! kernel in `crossnorm-autograd`; both are stateless functions over
//! caller-owned tensors.
//!
//! ## Quick Start
//!
//! ```
//! use crossnorm::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let x = Tensor::<f32>::from_vec(vec![3.0, 4.0], &[1, 2, 1, 1])?;
//! let scale = Tensor::<f32>::ones(&[2]);
//!
//! let y = channel_norm(&x, &scale, 0.0)?;
//! let data = y.as_slice().expect("contiguous output");
//! assert!((data[0] - 0.6).abs() < 1e-6);
//! assert!((data[1] - 0.8).abs() < 1e-6);
//!
//! // propagate an upstream gradient back to the input
//! let dy = Tensor::<f32>::ones(&[1, 2, 1, 1]);
//! let dx = channel_norm_backward(&dy, &x, &scale, 0.0)?;
//! assert!(dx.same_shape(&x));
//! # Ok(())
//! # }
//! ```

pub use crossnorm_autograd as autograd;
pub use crossnorm_core as core;

/// Commonly used items, importable in one line.
pub mod prelude {
    pub use crate::autograd::{
        channel_norm_backward, check_channel_norm_gradient, GradientCheckConfig,
        GradientCheckResult,
    };
    pub use crate::core::ops::{channel_norm, ensure_finite};
    pub use crate::core::{Result, Shape, Tensor, TensorError};
}

/// Crate version string
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
