//! The journal aggregation engine: builds the date-keyed index for a journal
//! and slices it by a requested date view.

use uuid::Uuid;

use crate::core::index::JournalIndex;
use crate::core::services::ServiceResult;
use crate::domain::{CalendarPolicy, DateView, FigureEnumeration, Journal, JournalEntry};
use crate::storage::{read_all_entries, DocumentStore};

/// A bounded window of a journal: the matching entries plus their
/// per-currency totals, tied back to the requesting view.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalView {
    pub journal: Journal,
    pub view: DateView,
    pub entries: Vec<JournalEntry>,
    pub totals: FigureEnumeration,
}

pub struct ViewService;

impl ViewService {
    /// Builds the date-keyed index for a journal.
    ///
    /// `None` journal id and missing journals both resolve to `Ok(None)` —
    /// there is no index for "no journal". An existing journal with no
    /// entries yields an empty index. Reads page through the whole entry set
    /// so large journals index completely.
    pub fn build_index(
        store: &dyn DocumentStore,
        journal_id: Option<Uuid>,
    ) -> ServiceResult<Option<JournalIndex>> {
        let Some(journal_id) = journal_id else {
            return Ok(None);
        };
        if store.get_journal(journal_id)?.is_none() {
            tracing::debug!(journal = %journal_id, "journal missing, no index built");
            return Ok(None);
        }
        let entries = read_all_entries(store, journal_id)?;
        let index = JournalIndex::build(journal_id, entries);
        tracing::debug!(journal = %journal_id, entries = index.len(), "built journal index");
        Ok(Some(index))
    }

    /// Slices an index by a date view: selects the entries whose dates fall
    /// inside the view's window (boundaries included) and sums their net
    /// figures grouped by currency. Entries without a net figure stay in the
    /// listing but contribute nothing to the totals.
    ///
    /// Pure and stateless; safe to run concurrently against the same index.
    pub fn slice(
        journal: &Journal,
        view: DateView,
        index: &JournalIndex,
        calendar: &CalendarPolicy,
    ) -> JournalView {
        let entries: Vec<JournalEntry> = match view.bounds(calendar) {
            Some((after, before)) => index.between(after, before).cloned().collect(),
            None => Vec::new(),
        };
        let totals: FigureEnumeration = entries
            .iter()
            .filter_map(JournalEntry::net_figure)
            .collect();
        JournalView {
            journal: journal.clone(),
            view,
            entries,
            totals,
        }
    }

    /// Convenience: fetch, index, and slice in one call. Resolves to
    /// `Ok(None)` when the journal does not exist.
    pub fn view(
        store: &dyn DocumentStore,
        journal_id: Option<Uuid>,
        view: DateView,
        calendar: &CalendarPolicy,
    ) -> ServiceResult<Option<JournalView>> {
        let Some(index) = Self::build_index(store, journal_id)? else {
            return Ok(None);
        };
        let Some(journal) = store.get_journal(index.journal_id())? else {
            return Ok(None);
        };
        Ok(Some(Self::slice(&journal, view, &index, calendar)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Figure;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store() -> (MemoryStore, Journal) {
        let store = MemoryStore::new();
        let journal = Journal::new("Spending");
        store.put_journal(&journal).unwrap();
        for (day, amount) in [(1, 100.0), (2, 200.0), (3, 300.0)] {
            let entry = JournalEntry::new(journal.id, date(2025, 1, day), format!("day {day}"))
                .with_figure(Figure::new("CAD", amount));
            store.put_entry(&entry).unwrap();
        }
        (store, journal)
    }

    #[test]
    fn build_index_without_journal_id_is_none() {
        let store = MemoryStore::new();
        assert!(ViewService::build_index(&store, None).unwrap().is_none());
    }

    #[test]
    fn build_index_for_missing_journal_is_none() {
        let store = MemoryStore::new();
        assert!(ViewService::build_index(&store, Some(Uuid::new_v4()))
            .unwrap()
            .is_none());
    }

    #[test]
    fn build_index_for_empty_journal_is_empty() {
        let store = MemoryStore::new();
        let journal = Journal::new("Empty");
        store.put_journal(&journal).unwrap();
        let index = ViewService::build_index(&store, Some(journal.id))
            .unwrap()
            .expect("index exists");
        assert!(index.is_empty());
    }

    #[test]
    fn monthly_slice_totals_by_currency() {
        let (store, journal) = seeded_store();
        let index = ViewService::build_index(&store, Some(journal.id))
            .unwrap()
            .expect("index exists");
        let view = ViewService::slice(
            &journal,
            DateView::Monthly {
                year: 2025,
                month: 1,
            },
            &index,
            &CalendarPolicy::default(),
        );
        assert_eq!(view.entries.len(), 3);
        assert_eq!(view.totals.amount("CAD"), Some(600.0));
    }

    #[test]
    fn entries_without_figures_are_listed_but_not_summed() {
        let (store, journal) = seeded_store();
        let memo_only = JournalEntry::new(journal.id, date(2025, 1, 2), "note to self");
        store.put_entry(&memo_only).unwrap();
        let index = ViewService::build_index(&store, Some(journal.id))
            .unwrap()
            .expect("index exists");
        let view = ViewService::slice(
            &journal,
            DateView::Monthly {
                year: 2025,
                month: 1,
            },
            &index,
            &CalendarPolicy::default(),
        );
        assert_eq!(view.entries.len(), 4);
        assert_eq!(view.totals.amount("CAD"), Some(600.0));
    }
}
