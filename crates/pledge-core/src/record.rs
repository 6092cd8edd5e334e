//! # Submission Record
//!
//! The one durable entity of the form: a flat snapshot of every answer plus
//! metadata. The same shape is used for the local draft (no reference id, no
//! device) and for the remote submission (both attached).
//!
//! ## Wire Format
//!
//! ```json
//! {
//!   "timestamp": "2026-10-15T08:30:00.000Z",
//!   "studentName": "Ada Reyes",
//!   "yearLevel": "2nd Year",
//!   "studentId": "2024-00123",
//!   "section": "BSCS-2A",
//!   "email": "ada@example.edu",
//!   "course": "BS Computer Science",
//!   "contactInfo": "0917 000 0000",
//!   "finalAgreement": true,
//!   "policySections": { "section_1": { "title": "...", "content": "..." } },
//!   "referenceId": "ACK-LOYW3V28-7F0XQ1",
//!   "deviceInfo": { "type": "Phone", "model": "Android 13 - Chrome" }
//! }
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::device::DeviceDescriptor;
use crate::error::PledgeError;
use crate::identity::ReferenceId;
use crate::surface::FieldName;
use crate::temporal::Timestamp;

/// Stable key of a policy section, rendered as `section_N`.
///
/// Keys come from the section's number label, not its display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey(u8);

impl SectionKey {
    /// Key for section number `n`. Zero is not a section number.
    pub fn new(n: u8) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    /// The 1-based section number.
    pub fn number(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "section_{}", self.0)
    }
}

impl FromStr for SectionKey {
    type Err = PledgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("section_")
            .and_then(|n| n.parse::<u8>().ok())
            .and_then(Self::new)
            .ok_or_else(|| PledgeError::InvalidIdentifier(format!("invalid section key: {s:?}")))
    }
}

impl Serialize for SectionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SectionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One policy section as captured from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySection {
    pub title: String,
    pub content: String,
}

/// Snapshot of the acknowledgement form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// When the snapshot was taken.
    pub timestamp: Timestamp,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub year_level: String,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub course: String,
    /// Free-text contact information.
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub final_agreement: bool,
    /// Policy sections ordered by section number.
    #[serde(default)]
    pub policy_sections: BTreeMap<SectionKey, PolicySection>,
    /// Present iff a submission attempt has been initiated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<ReferenceId>,
    /// Attached by the submitter only.
    #[serde(default, rename = "deviceInfo", skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceDescriptor>,
}

impl SubmissionRecord {
    /// An empty record stamped with `timestamp`.
    pub fn empty(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            student_name: String::new(),
            year_level: String::new(),
            student_id: String::new(),
            section: String::new(),
            email: String::new(),
            course: String::new(),
            contact_info: String::new(),
            final_agreement: false,
            policy_sections: BTreeMap::new(),
            reference_id: None,
            device: None,
        }
    }

    /// Whether a submission attempt has been initiated for this snapshot.
    pub fn is_submission_initiated(&self) -> bool {
        self.reference_id.is_some()
    }

    /// Whether the record may be sent to the remote endpoint.
    pub fn is_eligible_for_submission(&self) -> bool {
        self.final_agreement
    }

    /// The captured value of a personal field.
    pub fn field(&self, field: FieldName) -> &str {
        match field {
            FieldName::StudentName => &self.student_name,
            FieldName::YearLevel => &self.year_level,
            FieldName::StudentId => &self.student_id,
            FieldName::Section => &self.section,
            FieldName::Email => &self.email,
            FieldName::Course => &self.course,
            FieldName::ContactInfo => &self.contact_info,
        }
    }

    /// Consume the record, attaching the reference id for this attempt.
    pub fn with_reference_id(mut self, id: ReferenceId) -> Self {
        self.reference_id = Some(id);
        self
    }

    /// Consume the record, attaching the device descriptor.
    pub fn with_device(mut self, device: DeviceDescriptor) -> Self {
        self.device = Some(device);
        self
    }
}
