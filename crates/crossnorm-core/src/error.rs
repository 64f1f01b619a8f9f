use thiserror::Error;

/// Error type for tensor and kernel operations, carrying the name of the
/// failing operation and optional contextual information.
#[derive(Error, Debug, Clone)]
pub enum TensorError {
    #[error("Shape mismatch in operation '{operation}': expected {expected}, got {got}")]
    ShapeMismatch {
        operation: String,
        expected: String,
        got: String,
        context: Option<ErrorContext>,
    },

    #[error("Invalid shape in operation '{operation}': {reason}")]
    InvalidShape {
        operation: String,
        reason: String,
        shape: Option<Vec<usize>>,
        context: Option<ErrorContext>,
    },

    #[error("Invalid batch index {index} in operation '{operation}' for {len} batch elements")]
    InvalidIndex {
        operation: String,
        index: usize,
        len: usize,
        context: Option<ErrorContext>,
    },

    #[error("Invalid argument in operation '{operation}': {reason}")]
    InvalidArgument {
        operation: String,
        reason: String,
        context: Option<ErrorContext>,
    },

    #[error("Numerical error in operation '{operation}': {details}")]
    NumericalError {
        operation: String,
        details: String,
        context: Option<ErrorContext>,
    },

    #[error("Other error in operation '{operation}': {details}")]
    Other {
        operation: String,
        details: String,
        context: Option<ErrorContext>,
    },
}

/// Additional context information for errors
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Input tensor shapes
    pub input_shapes: Vec<Vec<usize>>,
    /// Output shape (if applicable)
    pub output_shape: Option<Vec<usize>>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add input tensor shape information
    pub fn with_input_shape(mut self, shape: &[usize]) -> Self {
        self.input_shapes.push(shape.to_vec());
        self
    }

    /// Add output shape information
    pub fn with_output_shape(mut self, shape: &[usize]) -> Self {
        self.output_shape = Some(shape.to_vec());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

impl TensorError {
    /// Create a shape mismatch error
    pub fn shape_mismatch(operation: &str, expected: &str, got: &str) -> Self {
        Self::ShapeMismatch {
            operation: operation.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
            context: None,
        }
    }

    /// Create an invalid shape error
    pub fn invalid_shape(operation: &str, reason: &str) -> Self {
        Self::InvalidShape {
            operation: operation.to_string(),
            reason: reason.to_string(),
            shape: None,
            context: None,
        }
    }

    /// Create an invalid batch index error
    pub fn invalid_index(operation: &str, index: usize, len: usize) -> Self {
        Self::InvalidIndex {
            operation: operation.to_string(),
            index,
            len,
            context: None,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(operation: &str, reason: &str) -> Self {
        Self::InvalidArgument {
            operation: operation.to_string(),
            reason: reason.to_string(),
            context: None,
        }
    }

    /// Create a numerical error
    pub fn numerical_error(operation: &str, details: &str) -> Self {
        Self::NumericalError {
            operation: operation.to_string(),
            details: details.to_string(),
            context: None,
        }
    }

    /// Create a generic "other" error
    pub fn other(operation: &str, details: &str) -> Self {
        Self::Other {
            operation: operation.to_string(),
            details: details.to_string(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        match &mut self {
            Self::ShapeMismatch { context: ctx, .. } => *ctx = Some(context),
            Self::InvalidShape { context: ctx, .. } => *ctx = Some(context),
            Self::InvalidIndex { context: ctx, .. } => *ctx = Some(context),
            Self::InvalidArgument { context: ctx, .. } => *ctx = Some(context),
            Self::NumericalError { context: ctx, .. } => *ctx = Some(context),
            Self::Other { context: ctx, .. } => *ctx = Some(context),
        }
        self
    }

    /// Get the operation name for this error
    pub fn operation(&self) -> &str {
        match self {
            Self::ShapeMismatch { operation, .. } => operation,
            Self::InvalidShape { operation, .. } => operation,
            Self::InvalidIndex { operation, .. } => operation,
            Self::InvalidArgument { operation, .. } => operation,
            Self::NumericalError { operation, .. } => operation,
            Self::Other { operation, .. } => operation,
        }
    }
}

pub type Result<T> = std::result::Result<T, TensorError>;

/// Convert from scirs2_core::ndarray::ShapeError to TensorError
impl From<scirs2_core::ndarray::ShapeError> for TensorError {
    fn from(err: scirs2_core::ndarray::ShapeError) -> Self {
        Self::InvalidShape {
            operation: "reshape".to_string(),
            reason: format!("Shape error: {err}"),
            shape: None,
            context: None,
        }
    }
}
