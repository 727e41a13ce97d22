use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use uuid::Uuid;

use crate::{
    domain::{Journal, JournalEntry},
    errors::PapayaError,
    utils::paths,
};

use super::{DocumentStore, EntryPage, Result};

const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed document store keeping one JSON document per journal.
///
/// Writes go through a temp file followed by a rename so a crash mid-write
/// never leaves a half-written document behind.
#[derive(Clone)]
pub struct JsonStore {
    journals_dir: PathBuf,
    state_file: PathBuf,
}

/// On-disk shape: the journal plus its entries in a single document.
#[derive(Debug, Serialize, Deserialize)]
struct JournalDocument {
    journal: Journal,
    #[serde(default)]
    entries: Vec<JournalEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_opened: Option<Uuid>,
}

impl JsonStore {
    /// Opens a store rooted at `root`, defaulting to the app data directory
    /// (`~/.papaya`, overridable via `PAPAYA_HOME`).
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = root.unwrap_or_else(paths::data_dir);
        paths::ensure_dir(&base)?;
        let journals_dir = paths::journals_dir_in(&base);
        paths::ensure_dir(&journals_dir)?;
        let state_file = paths::state_file_in(&base);
        Ok(Self {
            journals_dir,
            state_file,
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::new(None)
    }

    fn journal_path(&self, id: Uuid) -> PathBuf {
        self.journals_dir
            .join(format!("{}.{}", id, DOCUMENT_EXTENSION))
    }

    fn read_document(&self, id: Uuid) -> Result<Option<JournalDocument>> {
        let path = self.journal_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn write_document(&self, document: &JournalDocument) -> Result<()> {
        let path = self.journal_path(document.journal.id);
        let json = serde_json::to_string_pretty(document)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn update_document<F>(&self, journal_id: Uuid, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut JournalDocument) -> bool,
    {
        let Some(mut document) = self.read_document(journal_id)? else {
            return Ok(false);
        };
        if mutate(&mut document) {
            self.write_document(&document)?;
        }
        Ok(true)
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn write_state(&self, state: &StoreState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = tmp_path(&self.state_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.state_file)?;
        Ok(())
    }
}

impl DocumentStore for JsonStore {
    fn get_journal(&self, id: Uuid) -> Result<Option<Journal>> {
        Ok(self.read_document(id)?.map(|document| document.journal))
    }

    fn list_journals(&self) -> Result<Vec<Journal>> {
        let mut journals = Vec::new();
        for entry in fs::read_dir(&self.journals_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            let data = fs::read_to_string(&path)?;
            let document: JournalDocument = serde_json::from_str(&data)?;
            journals.push(document.journal);
        }
        journals.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(journals)
    }

    fn put_journal(&self, journal: &Journal) -> Result<()> {
        let entries = match self.read_document(journal.id)? {
            Some(document) => document.entries,
            None => Vec::new(),
        };
        self.write_document(&JournalDocument {
            journal: journal.clone(),
            entries,
        })
    }

    fn delete_journal(&self, id: Uuid) -> Result<bool> {
        let path = self.journal_path(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        let state = self.read_state()?;
        if state.last_opened == Some(id) {
            self.write_state(&StoreState { last_opened: None })?;
        }
        Ok(true)
    }

    fn get_entry(&self, journal_id: Uuid, entry_id: Uuid) -> Result<Option<JournalEntry>> {
        Ok(self.read_document(journal_id)?.and_then(|document| {
            document
                .entries
                .into_iter()
                .find(|entry| entry.id == entry_id)
        }))
    }

    fn put_entry(&self, entry: &JournalEntry) -> Result<()> {
        let updated = self.update_document(entry.journal_id, |document| {
            match document
                .entries
                .iter_mut()
                .find(|existing| existing.id == entry.id)
            {
                Some(existing) => *existing = entry.clone(),
                None => document.entries.push(entry.clone()),
            }
            true
        })?;
        if !updated {
            return Err(PapayaError::Storage(format!(
                "journal `{}` not found",
                entry.journal_id
            )));
        }
        Ok(())
    }

    fn delete_entry(&self, journal_id: Uuid, entry_id: Uuid) -> Result<bool> {
        let mut removed = false;
        self.update_document(journal_id, |document| {
            let before = document.entries.len();
            document.entries.retain(|entry| entry.id != entry_id);
            removed = document.entries.len() != before;
            removed
        })?;
        Ok(removed)
    }

    fn find_entries(&self, journal_id: Uuid, page: EntryPage) -> Result<Vec<JournalEntry>> {
        let Some(document) = self.read_document(journal_id)? else {
            return Ok(Vec::new());
        };
        let mut entries = document.entries;
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
        Ok(self.read_state()?.last_opened)
    }

    fn record_last_opened(&self, id: Option<Uuid>) -> Result<()> {
        self.write_state(&StoreState { last_opened: id })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
