//! # Form Surface
//!
//! The page is an external collaborator. Everything the controller needs from
//! it is expressed here as named fields read and written by key, plus the few
//! controls that are not plain text (the agreement toggle, the submit
//! trigger, the policy section blocks).
//!
//! [`MemoryForm`] is an in-process surface used by the CLI and by tests.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Named personal-information fields on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    StudentName,
    YearLevel,
    StudentId,
    Section,
    Email,
    Course,
    ContactInfo,
}

impl FieldName {
    /// Every tracked field, in form order.
    pub const ALL: [FieldName; 7] = [
        Self::StudentName,
        Self::YearLevel,
        Self::StudentId,
        Self::Section,
        Self::Email,
        Self::Course,
        Self::ContactInfo,
    ];

    /// Fields repopulated from a stored draft on page load.
    ///
    /// Course and contact info are captured in drafts but not restored.
    pub const RESTORABLE: [FieldName; 5] = [
        Self::StudentName,
        Self::YearLevel,
        Self::StudentId,
        Self::Section,
        Self::Email,
    ];

    /// Fields the page marks `required`.
    pub const REQUIRED: [FieldName; 6] = [
        Self::StudentName,
        Self::YearLevel,
        Self::StudentId,
        Self::Section,
        Self::Email,
        Self::Course,
    ];

    /// The element name/id of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::StudentName => "studentName",
            Self::YearLevel => "yearLevel",
            Self::StudentId => "studentId",
            Self::Section => "section",
            Self::Email => "email",
            Self::Course => "course",
            Self::ContactInfo => "contactInfo",
        }
    }

    /// Look a field up by element name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One repeated policy-section block as found on the page.
///
/// Either sub-element may be missing; such blocks are skipped by the
/// collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlock {
    /// Text of the number label, e.g. `"3"` or `"Section 3"`.
    #[serde(default)]
    pub number: Option<String>,
    /// Heading inside the content block.
    #[serde(default)]
    pub title: Option<String>,
    /// Body text of the content block.
    #[serde(default)]
    pub content: Option<String>,
}

/// Kind of native constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// A required field is blank.
    ValueMissing,
    /// The value does not match the field's input type.
    TypeMismatch,
}

/// A single native constraint failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub field: FieldName,
    pub kind: ConstraintKind,
}

impl ConstraintViolation {
    pub fn required(field: FieldName) -> Self {
        Self {
            field,
            kind: ConstraintKind::ValueMissing,
        }
    }

    pub fn type_mismatch(field: FieldName) -> Self {
        Self {
            field,
            kind: ConstraintKind::TypeMismatch,
        }
    }
}

/// Enabled flag and label of the submit trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerState {
    pub enabled: bool,
    pub label: String,
}

impl TriggerState {
    pub fn enabled(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }

    pub fn busy(label: impl Into<String>) -> Self {
        Self {
            enabled: false,
            label: label.into(),
        }
    }
}

/// Named key/value access to the acknowledgement form.
pub trait FormSurface {
    /// Current value of `field`, `None` if the page has no such element.
    fn get(&self, field: FieldName) -> Option<String>;

    /// Overwrite the value of `field`. Absent elements are left alone.
    fn set(&mut self, field: FieldName, value: &str);

    /// Checked state of the final-agreement control, `None` if absent.
    fn agreement(&self) -> Option<bool>;

    /// Set the final-agreement control. Absent controls are left alone.
    fn set_agreement(&mut self, checked: bool);

    /// Policy-section blocks in document order.
    fn section_blocks(&self) -> Vec<SectionBlock>;

    /// Result of native constraint validation across all fields.
    fn constraint_violations(&self) -> Vec<ConstraintViolation>;

    /// Toggle the "validated" marker that reveals inline messages.
    fn set_validated(&mut self, validated: bool);

    /// Reflect the submit trigger's state on the page.
    fn set_trigger(&mut self, state: &TriggerState);

    /// Reset every field to its initial value.
    fn reset(&mut self);
}

/// JSON description of a filled-in form, as read by the CLI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    /// Field values keyed by element name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// `None` models a page without the agreement control.
    #[serde(default)]
    pub final_agreement: Option<bool>,
    #[serde(default)]
    pub sections: Vec<SectionBlock>,
}

/// In-memory [`FormSurface`].
#[derive(Debug, Clone)]
pub struct MemoryForm {
    values: BTreeMap<FieldName, String>,
    required: BTreeSet<FieldName>,
    agreement: Option<bool>,
    sections: Vec<SectionBlock>,
    validated: bool,
    trigger: TriggerState,
}

impl MemoryForm {
    /// A blank form with every field and the agreement control present.
    pub fn new() -> Self {
        Self {
            values: FieldName::ALL.into_iter().map(|f| (f, String::new())).collect(),
            required: FieldName::REQUIRED.into_iter().collect(),
            agreement: Some(false),
            sections: Vec::new(),
            validated: false,
            trigger: TriggerState::enabled("Submit Acknowledgement"),
        }
    }

    /// Build a form from a snapshot. Unknown field keys are ignored.
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let mut form = Self::new();
        for (key, value) in &snapshot.fields {
            match FieldName::from_key(key) {
                Some(field) => form.set(field, value),
                None => tracing::debug!(key = %key, "ignoring unknown form field"),
            }
        }
        form.agreement = snapshot.final_agreement;
        form.sections = snapshot.sections.clone();
        form
    }

    /// Remove `field` from the page entirely.
    pub fn without_field(mut self, field: FieldName) -> Self {
        self.values.remove(&field);
        self.required.remove(&field);
        self
    }

    /// Remove the agreement control from the page.
    pub fn without_agreement(mut self) -> Self {
        self.agreement = None;
        self
    }

    /// Replace the policy-section blocks.
    pub fn with_sections(mut self, sections: Vec<SectionBlock>) -> Self {
        self.sections = sections;
        self
    }

    /// Whether inline validation messages are currently shown.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// Last trigger state pushed by the controller.
    pub fn trigger(&self) -> &TriggerState {
        &self.trigger
    }
}

impl Default for MemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSurface for MemoryForm {
    fn get(&self, field: FieldName) -> Option<String> {
        self.values.get(&field).cloned()
    }

    fn set(&mut self, field: FieldName, value: &str) {
        if let Some(slot) = self.values.get_mut(&field) {
            *slot = value.to_string();
        }
    }

    fn agreement(&self) -> Option<bool> {
        self.agreement
    }

    fn set_agreement(&mut self, checked: bool) {
        if let Some(slot) = self.agreement.as_mut() {
            *slot = checked;
        }
    }

    fn section_blocks(&self) -> Vec<SectionBlock> {
        self.sections.clone()
    }

    fn constraint_violations(&self) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        for (field, value) in &self.values {
            if self.required.contains(field) && value.trim().is_empty() {
                violations.push(ConstraintViolation::required(*field));
            } else if *field == FieldName::Email && !value.is_empty() && !looks_like_email(value) {
                violations.push(ConstraintViolation::type_mismatch(*field));
            }
        }
        violations
    }

    fn set_validated(&mut self, validated: bool) {
        self.validated = validated;
    }

    fn set_trigger(&mut self, state: &TriggerState) {
        self.trigger = state.clone();
    }

    fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.set_agreement(false);
    }
}

/// The shape an `<input type="email">` accepts: `local@label(.label)*`.
fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    const LOCAL_EXTRA: &str = ".!#$%&'*+/=?^_`{|}~-";
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_EXTRA.contains(c));
    let domain_ok = !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    local_ok && domain_ok
}
