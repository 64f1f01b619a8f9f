//! Gradient Operations
//!
//! # Modules
//! - [`normalization_ops`] - gradients for the normalization kernels

pub mod normalization_ops;
