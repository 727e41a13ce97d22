pub mod json_store;
pub mod memory;

use uuid::Uuid;

use crate::domain::{Journal, JournalEntry};
use crate::errors::PapayaError;

pub type Result<T> = std::result::Result<T, PapayaError>;

/// Default page size for entry queries.
pub const DEFAULT_FIND_LIMIT: usize = 10_000;

/// Page descriptor for entry queries. Callers that need the full entry set
/// keep advancing with [`EntryPage::next`] until a short page comes back
/// (see [`read_all_entries`]) rather than trusting a single capped read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPage {
    pub offset: usize,
    pub limit: usize,
}

impl Default for EntryPage {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_FIND_LIMIT,
        }
    }
}

impl EntryPage {
    pub fn first(limit: usize) -> Self {
        Self {
            offset: 0,
            limit: limit.max(1),
        }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }
}

/// Abstraction over document stores holding journals and their entries.
///
/// Stores are constructed explicitly and passed by reference; there is no
/// process-wide connection. Reads surface missing documents as `None`, never
/// as errors. Entry queries select by journal-id equality and return pages
/// in a stable (date, created_at, id) order so paging is deterministic.
pub trait DocumentStore: Send + Sync {
    fn get_journal(&self, id: Uuid) -> Result<Option<Journal>>;
    fn list_journals(&self) -> Result<Vec<Journal>>;
    fn put_journal(&self, journal: &Journal) -> Result<()>;
    /// Deletes the journal and all of its entries. Returns whether a journal
    /// existed.
    fn delete_journal(&self, id: Uuid) -> Result<bool>;

    fn get_entry(&self, journal_id: Uuid, entry_id: Uuid) -> Result<Option<JournalEntry>>;
    fn put_entry(&self, entry: &JournalEntry) -> Result<()>;
    fn delete_entry(&self, journal_id: Uuid, entry_id: Uuid) -> Result<bool>;
    fn find_entries(&self, journal_id: Uuid, page: EntryPage) -> Result<Vec<JournalEntry>>;

    fn last_opened_journal(&self) -> Result<Option<Uuid>>;
    fn record_last_opened(&self, id: Option<Uuid>) -> Result<()>;
}

/// Reads every entry of a journal, paging until the store runs dry.
pub fn read_all_entries(store: &dyn DocumentStore, journal_id: Uuid) -> Result<Vec<JournalEntry>> {
    read_all_entries_paged(store, journal_id, DEFAULT_FIND_LIMIT)
}

/// [`read_all_entries`] with an explicit page size.
pub fn read_all_entries_paged(
    store: &dyn DocumentStore,
    journal_id: Uuid,
    page_size: usize,
) -> Result<Vec<JournalEntry>> {
    let mut page = EntryPage::first(page_size);
    let mut entries = Vec::new();
    loop {
        let batch = store.find_entries(journal_id, page)?;
        let received = batch.len();
        entries.extend(batch);
        if received < page.limit {
            break;
        }
        page = page.next();
    }
    Ok(entries)
}

pub use json_store::JsonStore;
pub use memory::MemoryStore;
