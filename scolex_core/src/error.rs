//! Error types and result definitions for scolex.
//!
//! Every error is a violated precondition reported synchronously at the
//! offending call:
//! - Type mismatches (narrowing accessor called on the wrong tag)
//! - Range errors (list index out of bounds)
//! - Allocation failures (fallible interning only)

use crate::value::Tag;
use thiserror::Error;

/// The unified result type used throughout scolex.
pub type ScolexResult<T> = Result<T, ScolexError>;

/// Errors raised by value accessors and the symbol registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScolexError {
    /// A narrowing accessor was called on a value with a different tag.
    #[error("TypeMismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The tag the accessor requires.
        expected: Tag,
        /// The tag the value actually carries.
        found: Tag,
    },

    /// A list index was negative or not less than the list length.
    #[error("RangeError: index {index} out of bounds for list of length {len}")]
    RangeError {
        /// The requested index.
        index: isize,
        /// The length of the list.
        len: usize,
    },

    /// Storage for a new interned record could not be reserved.
    #[error("AllocationFailure: unable to allocate {what}")]
    AllocationFailure {
        /// What was being allocated.
        what: &'static str,
    },
}

impl ScolexError {
    /// Create a type mismatch error.
    #[must_use]
    pub const fn type_mismatch(expected: Tag, found: Tag) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Create a range error.
    #[must_use]
    pub const fn range(index: isize, len: usize) -> Self {
        Self::RangeError { index, len }
    }

    /// Create an allocation failure.
    #[must_use]
    pub const fn allocation(what: &'static str) -> Self {
        Self::AllocationFailure { what }
    }

    /// Get the error kind label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::RangeError { .. } => "RangeError",
            Self::AllocationFailure { .. } => "AllocationFailure",
        }
    }
}

impl From<std::collections::TryReserveError> for ScolexError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::allocation("interned symbol data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_creation() {
        let err = ScolexError::type_mismatch(Tag::Boolean, Tag::Number);

        match &err {
            ScolexError::TypeMismatch { expected, found } => {
                assert_eq!(*expected, Tag::Boolean);
                assert_eq!(*found, Tag::Number);
            }
            _ => panic!("Expected TypeMismatch"),
        }

        assert_eq!(err.kind(), "TypeMismatch");
        assert_eq!(
            err.to_string(),
            "TypeMismatch: expected boolean, found number"
        );
    }

    #[test]
    fn test_range_error_creation() {
        let err = ScolexError::range(-1, 3);

        assert_eq!(err.kind(), "RangeError");
        assert_eq!(
            err.to_string(),
            "RangeError: index -1 out of bounds for list of length 3"
        );
    }

    #[test]
    fn test_allocation_failure_creation() {
        let err = ScolexError::allocation("symbol table");

        assert_eq!(err.kind(), "AllocationFailure");
        assert_eq!(
            err.to_string(),
            "AllocationFailure: unable to allocate symbol table"
        );
    }

    #[test]
    fn test_try_reserve_error_converts() {
        let mut v: Vec<u8> = Vec::new();
        let reserve_err = v.try_reserve(usize::MAX).unwrap_err();
        let err: ScolexError = reserve_err.into();

        assert_eq!(err.kind(), "AllocationFailure");
    }

    #[test]
    fn test_error_is_clone_and_eq() {
        let original = ScolexError::range(3, 3);
        let cloned = original.clone();

        assert_eq!(original, cloned);
        assert_ne!(original, ScolexError::range(4, 3));
    }

    #[test]
    fn test_scolex_result_err() {
        let result: ScolexResult<f64> = Err(ScolexError::type_mismatch(Tag::Number, Tag::Nil));
        assert!(result.is_err());
    }
}
