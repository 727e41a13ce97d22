use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::domain::{Journal, JournalEntry};

use super::{DocumentStore, EntryPage, Result};

/// In-memory document store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    journals: HashMap<Uuid, Journal>,
    entries: HashMap<Uuid, HashMap<Uuid, JournalEntry>>,
    last_opened: Option<Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn get_journal(&self, id: Uuid) -> Result<Option<Journal>> {
        Ok(self.read().journals.get(&id).cloned())
    }

    fn list_journals(&self) -> Result<Vec<Journal>> {
        let mut journals: Vec<Journal> = self.read().journals.values().cloned().collect();
        journals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(journals)
    }

    fn put_journal(&self, journal: &Journal) -> Result<()> {
        let mut inner = self.write();
        inner.journals.insert(journal.id, journal.clone());
        inner.entries.entry(journal.id).or_default();
        Ok(())
    }

    fn delete_journal(&self, id: Uuid) -> Result<bool> {
        let mut inner = self.write();
        inner.entries.remove(&id);
        if inner.last_opened == Some(id) {
            inner.last_opened = None;
        }
        Ok(inner.journals.remove(&id).is_some())
    }

    fn get_entry(&self, journal_id: Uuid, entry_id: Uuid) -> Result<Option<JournalEntry>> {
        Ok(self
            .read()
            .entries
            .get(&journal_id)
            .and_then(|entries| entries.get(&entry_id))
            .cloned())
    }

    fn put_entry(&self, entry: &JournalEntry) -> Result<()> {
        let mut inner = self.write();
        if !inner.journals.contains_key(&entry.journal_id) {
            return Err(crate::errors::PapayaError::Storage(format!(
                "journal `{}` not found",
                entry.journal_id
            )));
        }
        inner
            .entries
            .entry(entry.journal_id)
            .or_default()
            .insert(entry.id, entry.clone());
        Ok(())
    }

    fn delete_entry(&self, journal_id: Uuid, entry_id: Uuid) -> Result<bool> {
        let mut inner = self.write();
        Ok(inner
            .entries
            .get_mut(&journal_id)
            .map(|entries| entries.remove(&entry_id).is_some())
            .unwrap_or(false))
    }

    fn find_entries(&self, journal_id: Uuid, page: EntryPage) -> Result<Vec<JournalEntry>> {
        let inner = self.read();
        let mut entries: Vec<JournalEntry> = inner
            .entries
            .get(&journal_id)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(entries
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect())
    }

    fn last_opened_journal(&self) -> Result<Option<Uuid>> {
        Ok(self.read().last_opened)
    }

    fn record_last_opened(&self, id: Option<Uuid>) -> Result<()> {
        self.write().last_opened = id;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn put_entry_requires_an_existing_journal() {
        let store = MemoryStore::new();
        let entry = JournalEntry::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "dangling",
        );
        assert!(store.put_entry(&entry).is_err());
    }

    #[test]
    fn delete_journal_cascades_to_entries() {
        let store = MemoryStore::new();
        let journal = Journal::new("Cascade");
        store.put_journal(&journal).unwrap();
        let entry = JournalEntry::new(
            journal.id,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "lunch",
        );
        store.put_entry(&entry).unwrap();

        assert!(store.delete_journal(journal.id).unwrap());
        assert!(store.get_entry(journal.id, entry.id).unwrap().is_none());
        assert!(store
            .find_entries(journal.id, EntryPage::default())
            .unwrap()
            .is_empty());
    }
}
