//! Business logic helpers for managing journals.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::Journal;
use crate::storage::DocumentStore;

/// Provides validated CRUD helpers for journals.
pub struct JournalService;

impl JournalService {
    /// Creates a journal with the given name and persists it.
    pub fn create(store: &dyn DocumentStore, name: &str) -> ServiceResult<Journal> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Journal name is empty".into()));
        }
        let journal = Journal::new(trimmed);
        store.put_journal(&journal)?;
        tracing::info!(journal = %journal.id, name = trimmed, "created journal");
        Ok(journal)
    }

    /// Renames the journal identified by `id`.
    pub fn rename(store: &dyn DocumentStore, id: Uuid, name: &str) -> ServiceResult<Journal> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Journal name is empty".into()));
        }
        let mut journal = store
            .get_journal(id)?
            .ok_or_else(|| ServiceError::Invalid("Journal not found".into()))?;
        journal.name = trimmed.to_string();
        store.put_journal(&journal)?;
        Ok(journal)
    }

    /// Removes the journal and all of its entries. Returns whether a journal
    /// existed.
    pub fn delete(store: &dyn DocumentStore, id: Uuid) -> ServiceResult<bool> {
        let existed = store.delete_journal(id)?;
        if existed {
            tracing::info!(journal = %id, "deleted journal");
        }
        Ok(existed)
    }

    /// Opens a journal: touches its last-opened timestamp and records it as
    /// the store's most recent journal. Missing journals read as `None`.
    pub fn open(store: &dyn DocumentStore, id: Uuid) -> ServiceResult<Option<Journal>> {
        let Some(mut journal) = store.get_journal(id)? else {
            return Ok(None);
        };
        journal.touch_opened();
        store.put_journal(&journal)?;
        store.record_last_opened(Some(id))?;
        Ok(Some(journal))
    }

    /// Picks the journal to show on cold start: the recorded last-opened
    /// journal if it still exists, else the most recently opened, else the
    /// most recently created, else `None`.
    pub fn default_journal(store: &dyn DocumentStore) -> ServiceResult<Option<Journal>> {
        if let Some(id) = store.last_opened_journal()? {
            if let Some(journal) = store.get_journal(id)? {
                return Ok(Some(journal));
            }
        }
        let mut journals = store.list_journals()?;
        journals.sort_by(|a, b| {
            b.last_opened_at
                .cmp(&a.last_opened_at)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(journals.into_iter().next())
    }
}
