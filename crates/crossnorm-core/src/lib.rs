#![allow(clippy::result_large_err)]

pub mod error;
pub mod ops;
pub mod shape;
pub mod tensor;
pub mod tensor_view;

pub use error::{ErrorContext, Result, TensorError};
pub use shape::Shape;
pub use tensor::{Tensor, TensorStorage};
