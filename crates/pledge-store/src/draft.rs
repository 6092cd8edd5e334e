//! # Draft Adapter
//!
//! Persists the in-progress [`SubmissionRecord`] under one fixed key. Each
//! save fully replaces the previous draft; only the latest survives.

use pledge_core::SubmissionRecord;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Storage key of the in-progress draft.
pub const DRAFT_KEY: &str = "policy_acknowledgement_draft";

/// Single-slot draft persistence over a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct DraftStore<S> {
    store: S,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Overwrite the stored draft with `record`.
    pub fn save(&mut self, record: &SubmissionRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record).map_err(StoreError::Serialize)?;
        self.store.set(DRAFT_KEY, &json)?;
        tracing::trace!(bytes = json.len(), "draft saved");
        Ok(())
    }

    /// The stored draft, if one exists and parses.
    ///
    /// A corrupt or unreadable draft is logged and treated as absent.
    pub fn load(&self) -> Option<SubmissionRecord> {
        match self.try_load() {
            Ok(draft) => draft,
            Err(e) => {
                tracing::error!(error = %e, key = DRAFT_KEY, "failed to load saved draft");
                None
            }
        }
    }

    /// Like [`load`](Self::load), but surfaces the failure.
    pub fn try_load(&self) -> Result<Option<SubmissionRecord>, StoreError> {
        let Some(raw) = self.store.get(DRAFT_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(StoreError::Parse)
    }

    /// Remove the stored draft.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(DRAFT_KEY)?;
        tracing::debug!(key = DRAFT_KEY, "draft cleared");
        Ok(())
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
