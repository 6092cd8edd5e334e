//! # Error Types
//!
//! Errors shared across the pledge workspace. All use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! Validation errors never leave the controller: they are reported on the form
//! surface and the form state is left unchanged.

use thiserror::Error;

use crate::surface::ConstraintViolation;

/// Top-level error type for pledge core operations.
#[derive(Error, Debug)]
pub enum PledgeError {
    /// A reference id or timestamp could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a form was rejected before submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The final-agreement control is absent or unchecked.
    #[error("the final agreement has not been accepted")]
    MissingAgreement,

    /// One or more fields failed native constraint validation.
    #[error("{} field(s) failed constraint validation", .0.len())]
    Constraints(Vec<ConstraintViolation>),
}

impl ValidationError {
    /// Whether this rejection should raise the modal error view.
    ///
    /// Constraint failures are surfaced inline only.
    pub fn is_modal(&self) -> bool {
        matches!(self, Self::MissingAgreement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FieldName;

    #[test]
    fn missing_agreement_is_modal() {
        assert!(ValidationError::MissingAgreement.is_modal());
    }

    #[test]
    fn constraint_failures_are_inline() {
        let err = ValidationError::Constraints(vec![ConstraintViolation::required(
            FieldName::StudentName,
        )]);
        assert!(!err.is_modal());
        assert_eq!(err.to_string(), "1 field(s) failed constraint validation");
    }
}
