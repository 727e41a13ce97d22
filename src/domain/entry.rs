use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::figure::Figure;
use super::stem::{RecurrenceRule, Stem};

/// A single dated financial transaction within a journal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub journal_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
    #[serde(default)]
    pub stems: Vec<Stem>,
    #[serde(default)]
    pub children: Vec<ChildEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A linked sub-entry whose amount adjusts its parent's net figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChildEntry {
    pub id: Uuid,
    #[serde(default)]
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure: Option<Figure>,
}

impl ChildEntry {
    pub fn new(memo: impl Into<String>, figure: Option<Figure>) -> Self {
        Self {
            id: Uuid::new_v4(),
            memo: memo.into(),
            figure,
        }
    }
}

impl JournalEntry {
    pub fn new(journal_id: Uuid, date: NaiveDate, memo: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            journal_id,
            date,
            memo: memo.into(),
            figure: None,
            stems: Vec::new(),
            children: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_figure(mut self, figure: Figure) -> Self {
        self.figure = Some(figure);
        self
    }

    pub fn attach(&mut self, stem: Stem) {
        self.stems.push(stem);
        self.touch();
    }

    pub fn add_child(&mut self, child: ChildEntry) {
        self.children.push(child);
        self.touch();
    }

    /// Topics collected from all tag stems.
    pub fn topics(&self) -> Vec<&str> {
        self.stems
            .iter()
            .flat_map(|stem| match stem {
                Stem::Tags { topics } => topics.as_slice(),
                _ => &[],
            })
            .map(String::as_str)
            .collect()
    }

    pub fn recurrence(&self) -> Option<&RecurrenceRule> {
        self.stems.iter().find_map(|stem| match stem {
            Stem::Recurrence(rule) => Some(rule),
            _ => None,
        })
    }

    /// Net figure: the entry's own amount adjusted by child entries sharing
    /// its currency. Children in other currencies do not adjust the net.
    /// Entries without an amount have no net figure and are excluded from
    /// aggregate sums while still appearing in listings.
    pub fn net_figure(&self) -> Option<Figure> {
        let mut net = self.figure.clone()?;
        for child in &self.children {
            if let Some(figure) = &child.figure {
                if figure.currency == net.currency {
                    net.amount += figure.amount;
                }
            }
        }
        Some(net)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_on(date: NaiveDate) -> JournalEntry {
        JournalEntry::new(Uuid::new_v4(), date, "groceries")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn net_figure_includes_same_currency_children() {
        let mut entry = entry_on(day(5)).with_figure(Figure::new("CAD", 100.0));
        entry.add_child(ChildEntry::new("refund", Some(Figure::new("CAD", -20.0))));
        entry.add_child(ChildEntry::new("tip", Some(Figure::new("USD", 5.0))));
        let net = entry.net_figure().expect("entry has a figure");
        assert_eq!(net.amount, 80.0);
        assert_eq!(net.currency, "CAD");
    }

    #[test]
    fn entry_without_amount_has_no_net_figure() {
        let mut entry = entry_on(day(5));
        entry.add_child(ChildEntry::new("orphan", Some(Figure::new("CAD", 10.0))));
        assert!(entry.net_figure().is_none());
    }

    #[test]
    fn topics_flatten_tag_stems() {
        let mut entry = entry_on(day(1));
        entry.attach(Stem::Tags {
            topics: vec!["food".into(), "home".into()],
        });
        entry.attach(Stem::Note {
            text: "weekly run".into(),
        });
        entry.attach(Stem::Tags {
            topics: vec!["shared".into()],
        });
        assert_eq!(entry.topics(), vec!["food", "home", "shared"]);
    }
}
