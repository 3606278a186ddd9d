//! Error types for the Cadence core library.
//!
//! Every error here is a configuration error in the wider sense: an input
//! value that does not conform to its expected grammar. All of them are
//! raised synchronously at parse or construction time.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A cycle string does not conform to the `<n><unit><stub>` grammar.
    #[error("Invalid cycle: '{value}' - {reason}")]
    InvalidCycle {
        /// The offending cycle string.
        value: String,
        /// Reason it failed to parse.
        reason: String,
    },

    /// An unrecognized convention code (day count, business day, calendar).
    #[error("Unknown {kind} convention: '{code}'")]
    UnknownConvention {
        /// Which convention family was being parsed.
        kind: &'static str,
        /// The unrecognized code.
        code: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid cycle error.
    #[must_use]
    pub fn invalid_cycle(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCycle {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown convention error.
    #[must_use]
    pub fn unknown_convention(kind: &'static str, code: impl Into<String>) -> Self {
        Self::UnknownConvention {
            kind,
            code: code.into(),
        }
    }
}
