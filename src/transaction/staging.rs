//! The batch staging list.
//!
//! Validated drafts accumulate here before a bulk submit, so several
//! transactions can be entered without a round trip per item.

use crate::{Error, api::TransactionApi};

use super::draft::Draft;

/// The session-local identifier of a staged entry.
///
/// Unique within one entry session only; the remote API never sees it.
pub type StagedEntryId = u64;

/// A validated draft waiting for the batch submit.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedTransaction {
    /// The session-local id used to key the list and allow removal.
    pub id: StagedEntryId,
    /// The staged draft.
    pub draft: Draft,
}

/// Accumulates validated drafts until they are persisted or discarded.
#[derive(Debug, Default)]
pub struct StagingList {
    entries: Vec<StagedTransaction>,
    next_id: StagedEntryId,
}

impl StagingList {
    /// Create an empty staging list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of a validated draft with a freshly generated local id.
    ///
    /// The caller is responsible for validating the draft first; the workflow
    /// only stages drafts that passed [Draft::validate](super::draft::Draft::validate).
    pub fn stage(&mut self, draft: Draft) -> StagedEntryId {
        self.next_id += 1;
        let id = self.next_id;

        self.entries.push(StagedTransaction { id, draft });

        id
    }

    /// Drop the entry with the given id. Does nothing if it is absent.
    pub fn remove(&mut self, id: StagedEntryId) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Drop every staged entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The staged entries, in insertion order.
    pub fn entries(&self) -> &[StagedTransaction] {
        &self.entries
    }

    /// Whether no entries are staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of staged entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Submit every staged entry to the remote API, one at a time, in
    /// insertion order.
    ///
    /// Each entry is removed from the list only after its own create call
    /// succeeds. On the first failure the sequence stops and the error
    /// propagates; the already-submitted prefix is NOT rolled back and the
    /// remaining entries stay staged for a retry. Returns the number of
    /// entries submitted.
    ///
    /// # Errors
    /// Returns the first error from the remote API, or [Error::InvalidDraft]
    /// if a staged draft no longer passes validation.
    pub async fn drain_and_submit(&mut self, api: &dyn TransactionApi) -> Result<usize, Error> {
        let mut submitted = 0;

        while !self.entries.is_empty() {
            let payload = self.entries[0].draft.to_payload()?;

            api.create_transaction(&payload).await?;

            self.entries.remove(0);
            submitted += 1;
        }

        Ok(submitted)
    }
}
