//! # pledge-core: Foundational Types for the Acknowledgement Form
//!
//! This crate is the leaf of the pledge workspace. It defines the submission
//! record, the identifiers and timestamps attached to it, and the pure logic
//! that the form controller composes: collecting answers from a form surface,
//! checking the acknowledgement rules, and classifying the submitting device.
//!
//! ## Key Design Principles
//!
//! 1. **Records are snapshots.** A [`SubmissionRecord`] is rebuilt from the
//!    form surface on every change. Nothing mutates it incrementally.
//!
//! 2. **Surfaces, not pages.** The page is reached only through the
//!    [`FormSurface`] trait: named fields in, named fields out. Collection and
//!    validation are testable without a rendering surface.
//!
//! 3. **Data-driven classification.** Device and browser detection are ordered
//!    rule tables evaluated first-match-wins. Every input string yields a
//!    descriptor; nothing in [`device`] can fail.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pledge-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod collect;
pub mod device;
pub mod error;
pub mod identity;
pub mod record;
pub mod sections;
pub mod surface;
pub mod temporal;
pub mod validate;

pub use collect::collect;
pub use device::{describe, DeviceDescriptor, DeviceType};
pub use error::{PledgeError, ValidationError};
pub use identity::{ReferenceId, DEFAULT_REFERENCE_PREFIX};
pub use record::{PolicySection, SectionKey, SubmissionRecord};
pub use sections::{canonical_title, CANONICAL_SECTIONS, SECTION_COUNT};
pub use surface::{
    ConstraintKind, ConstraintViolation, FieldName, FormSnapshot, FormSurface, MemoryForm,
    SectionBlock, TriggerState,
};
pub use temporal::Timestamp;
pub use validate::check_acknowledgement;
