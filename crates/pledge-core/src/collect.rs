//! # Form Data Collector
//!
//! Builds a [`SubmissionRecord`] from the current state of a [`FormSurface`].
//! Collection is a pure read: absent fields become empty strings, an absent
//! agreement control reads as unchecked, and section blocks lacking either a
//! number label or a content block are skipped.

use crate::record::{PolicySection, SectionKey, SubmissionRecord};
use crate::surface::{FieldName, FormSurface, SectionBlock};
use crate::temporal::Timestamp;

/// Snapshot the form, stamped with the current time.
pub fn collect<F: FormSurface + ?Sized>(form: &F) -> SubmissionRecord {
    collect_at(form, Timestamp::now())
}

/// Snapshot the form with an explicit timestamp.
pub fn collect_at<F: FormSurface + ?Sized>(form: &F, timestamp: Timestamp) -> SubmissionRecord {
    let value = |field: FieldName| form.get(field).unwrap_or_default();

    let mut record = SubmissionRecord::empty(timestamp);
    record.student_name = value(FieldName::StudentName);
    record.year_level = value(FieldName::YearLevel);
    record.student_id = value(FieldName::StudentId);
    record.section = value(FieldName::Section);
    record.email = value(FieldName::Email);
    record.course = value(FieldName::Course);
    record.contact_info = value(FieldName::ContactInfo);
    record.final_agreement = form.agreement().unwrap_or(false);

    for block in form.section_blocks() {
        if let Some((key, section)) = read_section(&block) {
            record.policy_sections.insert(key, section);
        }
    }
    record
}

fn read_section(block: &SectionBlock) -> Option<(SectionKey, PolicySection)> {
    let label = block.number.as_deref()?;
    let content = block.content.as_deref()?;
    let Some(key) = section_number(label).and_then(SectionKey::new) else {
        tracing::debug!(label = %label, "section label carries no section number; skipping");
        return None;
    };
    let title = block
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| format!("Section {}", key.number()), str::to_string);
    Some((
        key,
        PolicySection {
            title,
            content: content.trim().to_string(),
        },
    ))
}

/// First run of ASCII digits in `label`.
fn section_number(label: &str) -> Option<u8> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemoryForm;

    fn block(number: Option<&str>, title: Option<&str>, content: Option<&str>) -> SectionBlock {
        SectionBlock {
            number: number.map(str::to_string),
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn reads_every_named_field() {
        let mut form = MemoryForm::new();
        form.set(FieldName::StudentName, "Ada Reyes");
        form.set(FieldName::Course, "BS Computer Science");
        form.set(FieldName::ContactInfo, "0917 000 0000");
        form.set_agreement(true);

        let record = collect(&form);
        assert_eq!(record.student_name, "Ada Reyes");
        assert_eq!(record.course, "BS Computer Science");
        assert_eq!(record.contact_info, "0917 000 0000");
        assert!(record.final_agreement);
        assert!(record.reference_id.is_none());
        assert!(record.device.is_none());
    }

    #[test]
    fn absent_fields_become_empty_strings() {
        let form = MemoryForm::new()
            .without_field(FieldName::Course)
            .without_field(FieldName::ContactInfo);
        let record = collect(&form);
        assert_eq!(record.course, "");
        assert_eq!(record.contact_info, "");
    }

    #[test]
    fn absent_agreement_control_reads_false() {
        let form = MemoryForm::new().without_agreement();
        assert!(!collect(&form).final_agreement);
    }

    #[test]
    fn sections_keyed_by_label_not_position() {
        let form = MemoryForm::new().with_sections(vec![
            block(Some("Section 3"), Some("Conduct"), Some("Be kind.")),
            block(Some("1"), Some("Integrity"), Some("Be honest.")),
        ]);
        let record = collect(&form);
        let keys: Vec<String> = record.policy_sections.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["section_1", "section_3"]);
        assert_eq!(record.policy_sections[&SectionKey::new(3).unwrap()].title, "Conduct");
    }

    #[test]
    fn incomplete_blocks_are_skipped() {
        let form = MemoryForm::new().with_sections(vec![
            block(None, Some("No label"), Some("text")),
            block(Some("2"), Some("No content"), None),
            block(Some("no digits"), None, Some("text")),
            block(Some("4"), None, Some("  body  ")),
        ]);
        let record = collect(&form);
        assert_eq!(record.policy_sections.len(), 1);
        let section = &record.policy_sections[&SectionKey::new(4).unwrap()];
        assert_eq!(section.title, "Section 4");
        assert_eq!(section.content, "body");
    }

    #[test]
    fn collection_does_not_touch_the_form() {
        let mut form = MemoryForm::new();
        form.set(FieldName::Email, "ada@example.edu");
        let _ = collect(&form);
        assert_eq!(form.get(FieldName::Email).as_deref(), Some("ada@example.edu"));
        assert!(!form.is_validated());
    }
}
