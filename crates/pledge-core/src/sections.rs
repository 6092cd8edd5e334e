//! Canonical policy section titles.
//!
//! Receipts always show these titles, whatever heading text the page carried
//! when the answers were collected.

use crate::record::SectionKey;

/// Number of policy sections in the acknowledgement.
pub const SECTION_COUNT: u8 = 9;

/// `(section number, title)` for every policy section.
pub const CANONICAL_SECTIONS: [(u8, &str); SECTION_COUNT as usize] = [
    (1, "Academic Integrity"),
    (2, "Attendance and Punctuality"),
    (3, "Student Code of Conduct"),
    (4, "Uniform and Identification"),
    (5, "Use of Campus Facilities"),
    (6, "Acceptable Use of Information Technology"),
    (7, "Data Privacy and Consent"),
    (8, "Health, Safety, and Emergency Procedures"),
    (9, "Disciplinary Procedures and Sanctions"),
];

/// The canonical title for `key`, if it names one of the nine sections.
pub fn canonical_title(key: SectionKey) -> Option<&'static str> {
    CANONICAL_SECTIONS
        .iter()
        .find(|(n, _)| *n == key.number())
        .map(|(_, title)| *title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_a_title() {
        for n in 1..=SECTION_COUNT {
            let key = SectionKey::new(n).unwrap();
            assert!(canonical_title(key).is_some(), "missing title for {key}");
        }
    }

    #[test]
    fn unknown_sections_have_no_title() {
        assert_eq!(canonical_title(SectionKey::new(10).unwrap()), None);
    }
}
