//! Error types for the engine crate.
//!
//! All engine errors raise synchronously at parse or construction time,
//! before any event is generated: an instrument either produces its full
//! event list or fails entirely. There is no retry or partial-result path.

use thiserror::Error;

use cadence_core::CoreError;

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during contract evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An attribute value does not conform to its expected grammar, or a
    /// schedule specification is inconsistent.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },

    /// A mandatory attribute for the contract type is absent.
    #[error("Missing required attribute: {name}")]
    MissingAttribute {
        /// The missing attribute name.
        name: String,
    },

    /// The contract type tag does not match any supported kind.
    #[error("Unknown contract type: '{code}'")]
    UnknownContractType {
        /// The unrecognized contract type code.
        code: String,
    },

    /// A risk factor lookup failed. Signalled by the oracle and propagated
    /// unwrapped.
    #[error("Risk factor '{id}' unavailable: {reason}")]
    RiskFactor {
        /// The risk factor identifier.
        id: String,
        /// Reason the lookup failed.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),
}

impl EngineError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// Creates a missing attribute error.
    #[must_use]
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute { name: name.into() }
    }

    /// Creates an unknown contract type error.
    #[must_use]
    pub fn unknown_contract_type(code: impl Into<String>) -> Self {
        Self::UnknownContractType { code: code.into() }
    }

    /// Creates a risk factor lookup error.
    #[must_use]
    pub fn risk_factor(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RiskFactor {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
