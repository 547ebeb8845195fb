//! Error types for pipe units.
//!
//! Every fallible unit in this crate reports failures through [`PipeError`].
//! Errors are never swallowed: a pipeline either completes or stops at the
//! first failing step, and the error surfaces to whoever applied the unit.
//!
//! # Examples
//!
//! ```rust
//! use pipette::prelude::*;
//!
//! let empty: Vec<i32> = Vec::new();
//! let error = empty.pipe(first()).unwrap_err();
//! assert_eq!(format!("{error}"), "first: empty sequence");
//! ```

use thiserror::Error;

use crate::value::Shape;

/// Result alias used by fallible pipe units.
pub type PipeResult<T> = Result<T, PipeError>;

/// Errors raised while applying pipe units.
#[derive(Debug, Error)]
pub enum PipeError {
    /// The unit needs at least one item and the input had none.
    #[error("{operation}: empty sequence")]
    EmptySequence {
        /// Name of the failing unit.
        operation: &'static str,
    },

    /// An average (or other quotient) was taken over zero items.
    #[error("{operation}: division by zero")]
    DivisionByZero {
        /// Name of the failing unit.
        operation: &'static str,
    },

    /// An item did not have the shape the unit requires.
    #[error("{operation}: expected {expected}, found {found}")]
    Shape {
        /// Name of the failing unit.
        operation: &'static str,
        /// Human readable description of the accepted shape.
        expected: &'static str,
        /// Shape of the offending item.
        found: Shape,
    },

    /// A searched value was absent.
    #[error("{operation}: value not found")]
    NotFound {
        /// Name of the failing unit.
        operation: &'static str,
    },

    /// A unit was built with a parameter value it cannot work with.
    #[error("{operation}: invalid argument: {message}")]
    Argument {
        /// Name of the failing unit.
        operation: &'static str,
        /// What was wrong with the argument.
        message: String,
    },

    /// A whole-input type conversion failed.
    #[error("conversion failed: {0}")]
    Conversion(String),

    /// A file or network operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipeError {
    pub(crate) const fn empty(operation: &'static str) -> Self {
        Self::EmptySequence { operation }
    }

    pub(crate) const fn shape(operation: &'static str, expected: &'static str, found: Shape) -> Self {
        Self::Shape {
            operation,
            expected,
            found,
        }
    }

    pub(crate) fn argument(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Argument {
            operation,
            message: message.into(),
        }
    }

    /// Returns `true` when the error was caused by an empty input.
    ///
    /// Division by zero in `average` counts as an empty input.
    pub const fn is_empty_input(&self) -> bool {
        matches!(
            self,
            Self::EmptySequence { .. } | Self::DivisionByZero { .. }
        )
    }
}
