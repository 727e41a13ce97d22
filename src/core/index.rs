use std::collections::BTreeMap;
use std::ops::Bound;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{DateWindow, JournalEntry};

/// Date-keyed projection of a journal's entries.
///
/// Built once per journal load and never mutated in place; callers rebuild
/// when the entry set changes. Every build over the same entry collection is
/// structurally equal regardless of store iteration order.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalIndex {
    journal_id: Uuid,
    days: BTreeMap<NaiveDate, Vec<JournalEntry>>,
    entry_count: usize,
}

impl JournalIndex {
    pub fn build(journal_id: Uuid, entries: Vec<JournalEntry>) -> Self {
        let mut days: BTreeMap<NaiveDate, Vec<JournalEntry>> = BTreeMap::new();
        for entry in entries {
            days.entry(entry.date).or_default().push(entry);
        }
        for bucket in days.values_mut() {
            bucket.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        }
        let entry_count = days.values().map(Vec::len).sum();
        Self {
            journal_id,
            days,
            entry_count,
        }
    }

    pub fn journal_id(&self) -> Uuid {
        self.journal_id
    }

    pub fn len(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// Number of distinct dates carrying at least one entry.
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Entries recorded on exactly `date`.
    pub fn day(&self, date: NaiveDate) -> &[JournalEntry] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries inside `window`, in date order.
    pub fn range(&self, window: &DateWindow) -> impl Iterator<Item = &JournalEntry> {
        self.between(Some(window.start), Some(window.end))
    }

    /// Entries between the optional inclusive bounds, in date order. An
    /// absent bound is unbounded in that direction.
    pub fn between(
        &self,
        after: Option<NaiveDate>,
        before: Option<NaiveDate>,
    ) -> impl Iterator<Item = &JournalEntry> {
        let lower = after.map_or(Bound::Unbounded, Bound::Included);
        let upper = before.map_or(Bound::Unbounded, Bound::Included);
        self.days.range((lower, upper)).flat_map(|(_, bucket)| bucket)
    }

    /// All indexed entries, in date order.
    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.days.values().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Figure, JournalEntry};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn sample_entries(journal_id: Uuid) -> Vec<JournalEntry> {
        vec![
            JournalEntry::new(journal_id, date(3), "c").with_figure(Figure::new("CAD", 300.0)),
            JournalEntry::new(journal_id, date(1), "a").with_figure(Figure::new("CAD", 100.0)),
            JournalEntry::new(journal_id, date(1), "b").with_figure(Figure::new("CAD", 50.0)),
        ]
    }

    #[test]
    fn build_groups_entries_by_date() {
        let journal_id = Uuid::new_v4();
        let index = JournalIndex::build(journal_id, sample_entries(journal_id));
        assert_eq!(index.len(), 3);
        assert_eq!(index.day_count(), 2);
        assert_eq!(index.day(date(1)).len(), 2);
        assert_eq!(index.day(date(2)).len(), 0);
    }

    #[test]
    fn rebuilding_from_the_same_entries_is_structurally_equal() {
        let journal_id = Uuid::new_v4();
        let entries = sample_entries(journal_id);
        let mut shuffled = entries.clone();
        shuffled.reverse();
        let first = JournalIndex::build(journal_id, entries);
        let second = JournalIndex::build(journal_id, shuffled);
        assert_eq!(first, second);
    }

    #[test]
    fn between_honors_open_bounds() {
        let journal_id = Uuid::new_v4();
        let index = JournalIndex::build(journal_id, sample_entries(journal_id));
        let from_second: Vec<_> = index.between(Some(date(2)), None).collect();
        assert_eq!(from_second.len(), 1);
        assert_eq!(from_second[0].date, date(3));
        let all: Vec<_> = index.between(None, None).collect();
        assert_eq!(all.len(), 3);
    }
}
