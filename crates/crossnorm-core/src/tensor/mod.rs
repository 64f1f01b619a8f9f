//! Tensor Module
//!
//! The tensor functionality is split by concern:
//!
//! - **core**: tensor structure, storage, and property access
//! - **creation**: tensor constructors
//!
//! Everything is re-exported here so callers only deal with [`Tensor`].

pub mod core;
pub mod creation;

pub use self::core::{Tensor, TensorStorage};
