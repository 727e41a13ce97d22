//! Business logic helpers for managing journal entries.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Figure, JournalEntry, Stem};
use crate::storage::{read_all_entries, DocumentStore};

/// Provides validated CRUD helpers for journal entries.
pub struct EntryService;

impl EntryService {
    /// Creates an entry in the journal and returns it.
    pub fn create(
        store: &dyn DocumentStore,
        journal_id: Uuid,
        date: NaiveDate,
        memo: &str,
        figure: Option<Figure>,
    ) -> ServiceResult<JournalEntry> {
        let mut entry = JournalEntry::new(journal_id, date, memo);
        entry.figure = figure;
        store.put_entry(&entry)?;
        tracing::debug!(journal = %journal_id, entry = %entry.id, "created entry");
        Ok(entry)
    }

    /// Updates the entry identified by `id` via the provided mutator.
    pub fn update<F>(
        store: &dyn DocumentStore,
        journal_id: Uuid,
        id: Uuid,
        mutator: F,
    ) -> ServiceResult<JournalEntry>
    where
        F: FnOnce(&mut JournalEntry),
    {
        let mut entry = store
            .get_entry(journal_id, id)?
            .ok_or_else(|| ServiceError::Invalid("Entry not found".into()))?;
        mutator(&mut entry);
        entry.touch();
        store.put_entry(&entry)?;
        Ok(entry)
    }

    /// Removes the entry identified by `id`, returning the removed instance.
    pub fn remove(
        store: &dyn DocumentStore,
        journal_id: Uuid,
        id: Uuid,
    ) -> ServiceResult<JournalEntry> {
        let entry = store
            .get_entry(journal_id, id)?
            .ok_or_else(|| ServiceError::Invalid("Entry not found".into()))?;
        store.delete_entry(journal_id, id)?;
        Ok(entry)
    }

    pub fn get(
        store: &dyn DocumentStore,
        journal_id: Uuid,
        id: Uuid,
    ) -> ServiceResult<Option<JournalEntry>> {
        Ok(store.get_entry(journal_id, id)?)
    }

    /// Returns every entry of the journal, in date order.
    pub fn list(store: &dyn DocumentStore, journal_id: Uuid) -> ServiceResult<Vec<JournalEntry>> {
        Ok(read_all_entries(store, journal_id)?)
    }

    /// Attaches a stem (note, attachment, tags, obligation, recurrence) to
    /// an entry.
    pub fn attach_stem(
        store: &dyn DocumentStore,
        journal_id: Uuid,
        id: Uuid,
        stem: Stem,
    ) -> ServiceResult<JournalEntry> {
        Self::update(store, journal_id, id, |entry| entry.attach(stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::domain::Journal;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn store_with_journal() -> (MemoryStore, Journal) {
        let store = MemoryStore::new();
        let journal = Journal::new("Entries");
        store.put_journal(&journal).unwrap();
        (store, journal)
    }

    #[test]
    fn update_fails_for_missing_entry() {
        let (store, journal) = store_with_journal();
        let err = EntryService::update(&store, journal.id, Uuid::new_v4(), |_| {})
            .expect_err("update must fail for unknown id");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("not found")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn remove_returns_deleted_entry() {
        let (store, journal) = store_with_journal();
        let entry = EntryService::create(
            &store,
            journal.id,
            date(4),
            "coffee",
            Some(Figure::new("EUR", 3.2)),
        )
        .unwrap();

        let removed = EntryService::remove(&store, journal.id, entry.id).unwrap();
        assert_eq!(removed.id, entry.id);
        assert!(EntryService::get(&store, journal.id, entry.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn attach_stem_persists_through_the_store() {
        let (store, journal) = store_with_journal();
        let entry = EntryService::create(&store, journal.id, date(1), "rent", None).unwrap();
        EntryService::attach_stem(
            &store,
            journal.id,
            entry.id,
            Stem::Tags {
                topics: vec!["housing".into()],
            },
        )
        .unwrap();

        let reloaded = EntryService::get(&store, journal.id, entry.id)
            .unwrap()
            .expect("entry exists");
        assert_eq!(reloaded.topics(), vec!["housing"]);
    }
}
