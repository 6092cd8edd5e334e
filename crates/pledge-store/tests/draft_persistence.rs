//! Draft persistence against the directory-backed store.
//!
//! Covers the save/load equality property for arbitrary field text, the
//! last-writer-wins rule for consecutive auto-saves, and corrupt-file handling.

use pledge_core::{PolicySection, SectionKey, SubmissionRecord, Timestamp};
use pledge_store::{DraftStore, FileStore, KeyValueStore, DRAFT_KEY};
use proptest::prelude::*;

fn record_with(name: &str, email: &str, contact: &str, agreed: bool) -> SubmissionRecord {
    let mut record = SubmissionRecord::empty(Timestamp::from_epoch_millis(1_760_000_000_000).unwrap());
    record.student_name = name.to_string();
    record.email = email.to_string();
    record.contact_info = contact.to_string();
    record.final_agreement = agreed;
    record
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn save_then_load_is_identity(
        name in ".*",
        email in ".*",
        contact in ".*",
        agreed in any::<bool>(),
        content in ".*",
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut drafts = DraftStore::new(FileStore::open(dir.path()).unwrap());

        let mut saved = record_with(&name, &email, &contact, agreed);
        saved.policy_sections.insert(
            SectionKey::new(5).unwrap(),
            PolicySection { title: "Use of Campus Facilities".into(), content },
        );
        drafts.save(&saved).unwrap();

        prop_assert_eq!(drafts.load(), Some(saved));
    }
}

#[test]
fn consecutive_autosaves_keep_only_the_second() {
    let dir = tempfile::tempdir().unwrap();
    let mut drafts = DraftStore::new(FileStore::open(dir.path()).unwrap());

    drafts
        .save(&record_with("Ada", "ada@example.edu", "", false))
        .unwrap();
    drafts
        .save(&record_with("Ada Reyes", "ada.reyes@example.edu", "", true))
        .unwrap();

    let loaded = drafts.load().unwrap();
    assert_eq!(loaded.student_name, "Ada Reyes");
    assert_eq!(loaded.email, "ada.reyes@example.edu");
    assert!(loaded.final_agreement);
}

#[test]
fn corrupt_file_yields_none_and_can_be_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set(DRAFT_KEY, "\u{0}garbage").unwrap();

    let mut drafts = DraftStore::new(store);
    assert_eq!(drafts.load(), None);

    let fresh = record_with("Ada", "ada@example.edu", "", false);
    drafts.save(&fresh).unwrap();
    assert_eq!(drafts.load(), Some(fresh));
}

#[test]
fn draft_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let saved = record_with("Ada", "ada@example.edu", "0917", true);
    {
        let mut drafts = DraftStore::new(FileStore::open(dir.path()).unwrap());
        drafts.save(&saved).unwrap();
    }
    let drafts = DraftStore::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(drafts.load(), Some(saved));
}
