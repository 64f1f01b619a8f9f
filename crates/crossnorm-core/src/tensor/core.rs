//! Core Tensor Structure and Properties
//!
//! The fundamental tensor structure, storage definition, and basic property
//! access. Kernels read their inputs through these accessors and never hold
//! on to a tensor past a single invocation.

use crate::Shape;
use scirs2_core::ndarray::ArrayD;

/// Core tensor structure that holds data and shape metadata
#[derive(Debug, Clone)]
pub struct Tensor<T> {
    pub storage: TensorStorage<T>,
    pub(in crate::tensor) shape: Shape,
}

/// Storage abstraction for tensor data
///
/// CPU storage is a contiguous row-major ndarray. Additional backends hang
/// off this enum, which is why kernels match on it rather than reaching into
/// the array directly.
#[derive(Debug, Clone)]
pub enum TensorStorage<T> {
    Cpu(ArrayD<T>),
}

impl<T> Tensor<T> {
    /// Get the shape of the tensor
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.rank()
    }

    /// Total number of elements
    pub fn numel(&self) -> usize {
        self.shape.elements()
    }

    /// Check if tensor is empty (has no elements)
    pub fn is_empty(&self) -> bool {
        self.shape.elements() == 0
    }

    /// Get the underlying data as a contiguous slice, if the storage layout
    /// allows it
    pub fn as_slice(&self) -> Option<&[T]> {
        match &self.storage {
            TensorStorage::Cpu(array) => array.as_slice(),
        }
    }

    /// Get the value at a specific index
    pub fn get(&self, index: &[usize]) -> Option<T>
    where
        T: Clone,
    {
        match &self.storage {
            TensorStorage::Cpu(arr) => {
                if index.len() != arr.ndim() {
                    return None;
                }
                arr.get(index).cloned()
            }
        }
    }

    /// Copy the tensor contents into a row-major vector
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        match &self.storage {
            TensorStorage::Cpu(arr) => arr.iter().cloned().collect(),
        }
    }

    /// Check if two tensors have the same shape
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}
