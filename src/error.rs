//! Error types for densexpr

use thiserror::Error;

/// Result type alias using densexpr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the checked entry points of densexpr
///
/// The unchecked constructors (`Select::new`, the `select*` factories) treat
/// a shape mismatch as a programming error and panic with the `Display` of
/// the corresponding variant instead of returning it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shape mismatch between operands, or between a source and destination
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::shape_mismatch(&[2, 3], &[2, 2]);
        assert_eq!(err.to_string(), "Shape mismatch: expected [2, 3], got [2, 2]");
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let err = Error::IndexOutOfBounds { index: 7, size: 4 };
        assert_eq!(
            err.to_string(),
            "Index 7 out of bounds for dimension of size 4"
        );
    }
}
