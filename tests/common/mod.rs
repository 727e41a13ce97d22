use chrono::NaiveDate;
use papaya_core::domain::{Figure, Journal, JournalEntry};
use papaya_core::storage::DocumentStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Creates a journal and seeds it with one CAD entry per `(date, amount)` row.
pub fn seeded_journal(
    store: &dyn DocumentStore,
    name: &str,
    rows: &[(NaiveDate, f64)],
) -> Journal {
    let journal = Journal::new(name);
    store.put_journal(&journal).expect("save journal");
    for (index, (day, amount)) in rows.iter().enumerate() {
        let entry = JournalEntry::new(journal.id, *day, format!("entry {index}"))
            .with_figure(Figure::new("CAD", *amount));
        store.put_entry(&entry).expect("save entry");
    }
    journal
}
