//! Structured admission errors.
//!
//! Validation failures are reported as per-field causes wrapped in one of a
//! small set of outcomes mirroring the Kubernetes status reasons: Invalid
//! (422) aggregates field errors, Forbidden (403) rejects a structurally
//! valid change by policy, NotFound (404) surfaces a missing reference as-is
//! and Internal (500) wraps a dependency failure. Internal errors abort
//! validation immediately; everything else is collected where the validator
//! aggregates.

use std::fmt;

use kube::core::response::{Status, StatusCause, StatusDetails, StatusSummary};
use thiserror::Error;

use crate::store::StoreError;

/// Advisory messages returned with an allowed decision. Warnings never
/// change the admit/deny outcome.
pub type Warnings = Vec<String>;

/// Result of a single validation operation.
pub type AdmissionResult = Result<Warnings, AdmissionError>;

/// Classification of a single field-level violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CauseType {
    /// A mandatory field or cross-reference is missing.
    Required,
    /// A present value fails a format or semantic constraint.
    Invalid,
    /// A present value does not match its declared type.
    TypeInvalid,
    /// A referenced object does not exist at decision time.
    NotFound,
    /// A structurally valid change is rejected by policy.
    Forbidden,
    /// A dependency failed for reasons unrelated to the candidate.
    Internal,
}

impl CauseType {
    /// Machine-readable reason, matching the metav1.CauseType strings.
    pub fn reason(&self) -> &'static str {
        match self {
            CauseType::Required => "FieldValueRequired",
            CauseType::Invalid => "FieldValueInvalid",
            CauseType::TypeInvalid => "FieldValueTypeInvalid",
            CauseType::NotFound => "FieldValueNotFound",
            CauseType::Forbidden => "FieldValueForbidden",
            CauseType::Internal => "InternalError",
        }
    }
}

/// A single violation keyed on a field path.
#[derive(Clone, Debug)]
pub struct FieldError {
    pub cause: CauseType,
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(cause: CauseType, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            cause,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn required(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CauseType::Required, path, message)
    }

    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CauseType::Invalid, path, message)
    }

    pub fn type_invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CauseType::TypeInvalid, path, message)
    }

    pub fn not_found(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CauseType::NotFound, path, message)
    }

    pub fn forbidden(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CauseType::Forbidden, path, message)
    }

    fn to_cause(&self) -> StatusCause {
        StatusCause {
            reason: self.cause.reason().to_string(),
            message: self.message.clone(),
            field: self.path.clone(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a rejected admission decision.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// Malformed request that cannot be decoded or is missing the candidate.
    #[error("malformed admission request: {0}")]
    Structural(String),

    /// Aggregate per-field rejection of the candidate's content.
    #[error("{kind} \"{name}\" is invalid: {}", join_errors(.errors))]
    Invalid {
        kind: &'static str,
        name: String,
        errors: Vec<FieldError>,
    },

    /// Policy rejection of an otherwise-valid change.
    #[error("{kind} \"{name}\" is forbidden: {error}")]
    Forbidden {
        kind: &'static str,
        name: String,
        error: FieldError,
    },

    /// A referenced object does not exist, surfaced as-is.
    #[error("{kind} \"{name}\" not found")]
    NotFound { kind: String, name: String },

    /// A dependency failed; the candidate was not judged.
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AdmissionError {
    pub fn invalid(kind: &'static str, name: impl Into<String>, errors: Vec<FieldError>) -> Self {
        AdmissionError::Invalid {
            kind,
            name: name.into(),
            errors,
        }
    }

    pub fn forbidden(kind: &'static str, name: impl Into<String>, error: FieldError) -> Self {
        AdmissionError::Forbidden {
            kind,
            name: name.into(),
            error,
        }
    }

    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        AdmissionError::Internal(Box::new(err))
    }

    /// HTTP status code carried in the admission response result.
    pub fn code(&self) -> u16 {
        match self {
            AdmissionError::Structural(_) => 400,
            AdmissionError::Invalid { .. } => 422,
            AdmissionError::Forbidden { .. } => 403,
            AdmissionError::NotFound { .. } => 404,
            AdmissionError::Internal(_) => 500,
        }
    }

    /// Machine-readable status reason.
    pub fn reason(&self) -> &'static str {
        match self {
            AdmissionError::Structural(_) => "BadRequest",
            AdmissionError::Invalid { .. } => "Invalid",
            AdmissionError::Forbidden { .. } => "Forbidden",
            AdmissionError::NotFound { .. } => "NotFound",
            AdmissionError::Internal(_) => "InternalError",
        }
    }

    /// Render the structured status returned to the API server.
    pub fn to_status(&self) -> Status {
        let (name, kind, causes) = match self {
            AdmissionError::Invalid { kind, name, errors } => (
                name.clone(),
                kind.to_string(),
                errors.iter().map(FieldError::to_cause).collect(),
            ),
            AdmissionError::Forbidden { kind, name, error } => {
                (name.clone(), kind.to_string(), vec![error.to_cause()])
            }
            AdmissionError::NotFound { kind, name } => {
                (name.clone(), kind.clone(), Vec::new())
            }
            AdmissionError::Structural(_) | AdmissionError::Internal(_) => {
                (String::new(), String::new(), Vec::new())
            }
        };
        Status {
            status: Some(StatusSummary::Failure),
            message: self.to_string(),
            reason: self.reason().to_string(),
            details: Some(StatusDetails {
                name,
                group: crate::crd::GROUP.to_string(),
                kind,
                uid: String::new(),
                causes,
                retry_after_seconds: 0,
            }),
            code: self.code(),
        }
    }
}

impl From<StoreError> for AdmissionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, name } => AdmissionError::NotFound {
                kind: kind.to_string(),
                name,
            },
            other => AdmissionError::internal(other),
        }
    }
}
