//! Normalization Operations
//!
//! Cross-channel L2 normalization for convolutional feature maps: at every
//! spatial location the channel column is divided by its L2 norm (with an
//! additive epsilon) and rescaled by a learned per-channel factor. The
//! matching gradient kernel lives in the autograd crate; the two entry
//! points share only the tensor and view conventions, not any cached state.

pub mod channel_norm;

#[cfg(test)]
pub mod tests;

pub use channel_norm::channel_norm;
