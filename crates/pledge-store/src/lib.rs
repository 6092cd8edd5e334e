//! # pledge-store: Draft Persistence
//!
//! Keeps the single most recent in-progress answer set so a student can close
//! the page and pick up where they left off.
//!
//! ## Layers
//!
//! - [`KeyValueStore`] is the storage slot abstraction: string keys to string
//!   values, every write a full overwrite. [`MemoryStore`] and [`FileStore`]
//!   implement it.
//! - [`DraftStore`] owns one fixed key and speaks [`SubmissionRecord`]s. A
//!   corrupt stored value is logged and reported as "no draft"; it never
//!   reaches the caller as an error.
//!
//! [`SubmissionRecord`]: pledge_core::SubmissionRecord

pub mod draft;
pub mod error;
pub mod store;

pub use draft::{DraftStore, DRAFT_KEY};
pub use error::StoreError;
pub use store::{FileStore, KeyValueStore, MemoryStore};
