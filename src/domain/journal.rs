use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// A named collection of journal entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journal {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened_at: Option<DateTime<Utc>>,
    #[serde(default = "Journal::schema_version_default")]
    pub schema_version: u8,
}

impl Journal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            last_opened_at: None,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Records that the journal was opened; used to pick a default journal
    /// on cold start.
    pub fn touch_opened(&mut self) {
        self.last_opened_at = Some(Utc::now());
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
