use uuid::Uuid;

use crate::config::Config;
use crate::core::services::{JournalService, JournalView, ServiceResult, ViewService};
use crate::domain::{CalendarPolicy, DateView, Journal};
use crate::storage::DocumentStore;

/// Application state holding the store handle and configuration.
///
/// Constructed explicitly and passed by reference to whatever needs it;
/// there is no process-wide singleton connection or ambient context.
pub struct Workspace {
    store: Box<dyn DocumentStore>,
    config: Config,
}

impl Workspace {
    pub fn new(store: Box<dyn DocumentStore>, config: Config) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn calendar(&self) -> CalendarPolicy {
        self.config.calendar()
    }

    /// The journal to show on cold start, if any.
    pub fn open_default_journal(&mut self) -> ServiceResult<Option<Journal>> {
        let Some(journal) = JournalService::default_journal(self.store.as_ref())? else {
            return Ok(None);
        };
        self.open_journal(journal.id)
    }

    /// Opens a journal and remembers it as the most recent one.
    pub fn open_journal(&mut self, id: Uuid) -> ServiceResult<Option<Journal>> {
        let opened = JournalService::open(self.store.as_ref(), id)?;
        if let Some(journal) = &opened {
            self.config.last_opened_journal = Some(journal.id);
        }
        Ok(opened)
    }

    /// Builds the index for `journal_id` and slices it by `view` in one
    /// call. `None` for an absent or unknown journal.
    pub fn view(
        &self,
        journal_id: Option<Uuid>,
        view: DateView,
    ) -> ServiceResult<Option<JournalView>> {
        ViewService::view(self.store.as_ref(), journal_id, view, &self.calendar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::EntryService;
    use crate::domain::Figure;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    #[test]
    fn workspace_view_runs_end_to_end() {
        let mut workspace = Workspace::new(Box::new(MemoryStore::new()), Config::default());
        let journal = JournalService::create(workspace.store(), "Daily").unwrap();
        EntryService::create(
            workspace.store(),
            journal.id,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            "pie",
            Some(Figure::new("USD", 3.14)),
        )
        .unwrap();
        workspace.open_journal(journal.id).unwrap();

        let view = workspace
            .view(
                Some(journal.id),
                DateView::Daily {
                    year: 2025,
                    month: 3,
                    day: 14,
                },
            )
            .unwrap()
            .expect("journal exists");
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.totals.amount("USD"), Some(3.14));
        assert_eq!(workspace.config().last_opened_journal, Some(journal.id));
    }

    #[test]
    fn view_of_unknown_journal_is_none() {
        let workspace = Workspace::new(Box::new(MemoryStore::new()), Config::default());
        let missing = workspace
            .view(Some(Uuid::new_v4()), DateView::Annual { year: 2025 })
            .unwrap();
        assert!(missing.is_none());
    }
}
