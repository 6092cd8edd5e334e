//! # Acknowledgement Rules
//!
//! Two rules, checked in order and short-circuiting:
//!
//! 1. The final-agreement control exists and is checked.
//! 2. Every field passes native constraint validation.
//!
//! This module only decides. Reporting the rejection (error view, inline
//! messages) is the controller's job.

use crate::error::ValidationError;
use crate::surface::FormSurface;

/// Check `form` against the acknowledgement rules.
pub fn check_acknowledgement<F: FormSurface + ?Sized>(form: &F) -> Result<(), ValidationError> {
    if form.agreement() != Some(true) {
        return Err(ValidationError::MissingAgreement);
    }
    let violations = form.constraint_violations();
    if !violations.is_empty() {
        return Err(ValidationError::Constraints(violations));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ConstraintViolation, FieldName, MemoryForm};

    fn complete_form() -> MemoryForm {
        let mut form = MemoryForm::new();
        form.set(FieldName::StudentName, "Ada Reyes");
        form.set(FieldName::YearLevel, "2nd Year");
        form.set(FieldName::StudentId, "2024-00123");
        form.set(FieldName::Section, "BSCS-2A");
        form.set(FieldName::Email, "ada@example.edu");
        form.set(FieldName::Course, "BS Computer Science");
        form
    }

    #[test]
    fn accepts_complete_checked_form() {
        let mut form = complete_form();
        form.set_agreement(true);
        assert_eq!(check_acknowledgement(&form), Ok(()));
    }

    #[test]
    fn unchecked_agreement_fails_first() {
        // Blank fields would also fail, but the agreement rule short-circuits.
        let form = MemoryForm::new();
        assert_eq!(
            check_acknowledgement(&form),
            Err(ValidationError::MissingAgreement)
        );
    }

    #[test]
    fn absent_agreement_control_fails() {
        let form = complete_form().without_agreement();
        assert_eq!(
            check_acknowledgement(&form),
            Err(ValidationError::MissingAgreement)
        );
    }

    #[test]
    fn constraint_failures_reported_after_agreement() {
        let mut form = complete_form();
        form.set(FieldName::StudentName, "   ");
        form.set_agreement(true);
        assert_eq!(
            check_acknowledgement(&form),
            Err(ValidationError::Constraints(vec![ConstraintViolation::required(
                FieldName::StudentName
            )]))
        );
    }
}
