//! Error and warning types for the SFI core.

use thiserror::Error;

/// Result type for SFI operations.
pub type Result<T> = std::result::Result<T, SfiError>;

/// Broad classification of an [`SfiError`], stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied input the core cannot accept.
    Validation,
    /// A referenced dataset does not exist.
    NotFound,
    /// An internal invariant was broken. Always a defect.
    InternalInvariant,
    /// The storage collaborator failed to read or write.
    Persistence,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::InternalInvariant => "internal_invariant",
            Self::Persistence => "persistence",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by SFI operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SfiError {
    /// Input rejected before any computation ran.
    #[error("invalid input: {0}")]
    Validation(String),

    /// No filter criteria survived validation.
    #[error("no valid filter criteria provided")]
    NoValidCriteria,

    /// Strict mode: a (group, value) pair has no assigned prime.
    #[error("unknown attribute {group}={value}")]
    UnknownAttribute { group: String, value: String },

    /// Strict mode: a vector carries factors outside the assignment.
    #[error("vector {vector} contains unrecognized factors (remainder {remainder})")]
    UnrecognizedFactors { vector: String, remainder: String },

    /// A referenced dataset is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// An invariant that a correctly built assignment guarantees was violated.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// Storage read/write failure, passed through from the persistence layer.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl SfiError {
    /// Creates a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_)
            | Self::NoValidCriteria
            | Self::UnknownAttribute { .. }
            | Self::UnrecognizedFactors { .. } => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InternalInvariant(_) => ErrorKind::InternalInvariant,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// Non-fatal conditions attached to a successful result.
///
/// Warnings never turn a success into a failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SfiWarning {
    /// Decode finished with a remainder other than 1.
    UnrecognizedFactor { vector: String, remainder: String },
    /// Encode or filter dropped a pair with no assigned prime.
    UnknownCriterion { group: String, value: String },
    /// Filter skipped a stored record without a usable vector.
    SkippedRecord { id: Option<String>, reason: String },
}

impl std::fmt::Display for SfiWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedFactor { vector, remainder } => write!(
                f,
                "Vector {vector} contains unrecognized factors or is incomplete. Remainder: {remainder}"
            ),
            Self::UnknownCriterion { group, value } => {
                write!(f, "unknown attribute ignored: {group}={value}")
            }
            Self::SkippedRecord { id, reason } => write!(
                f,
                "skipping record {}: {reason}",
                id.as_deref().unwrap_or("<missing id>")
            ),
        }
    }
}
