use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Attachable sub-objects carried by a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stem {
    Note {
        text: String,
    },
    Attachment {
        file_name: String,
        mime: String,
        size_bytes: u64,
    },
    Tags {
        topics: Vec<String>,
    },
    Obligation {
        due: NaiveDate,
        #[serde(default)]
        settled: bool,
    },
    Recurrence(RecurrenceRule),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        match self.unit {
            TimeUnit::Day => from + Duration::days(self.every as i64),
            TimeUnit::Week => from + Duration::weeks(self.every as i64),
            TimeUnit::Month => shift_month(from, self.every as i32),
            TimeUnit::Year => shift_year(from, self.every as i32),
        }
    }

    pub fn previous_date(&self, from: NaiveDate) -> NaiveDate {
        match self.unit {
            TimeUnit::Day => from - Duration::days(self.every as i64),
            TimeUnit::Week => from - Duration::weeks(self.every as i64),
            TimeUnit::Month => shift_month(from, -(self.every as i32)),
            TimeUnit::Year => shift_year(from, -(self.every as i32)),
        }
    }
}

/// Schedule attached to an entry through a recurrence stem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub start_date: NaiveDate,
    pub interval: TimeInterval,
    #[serde(default)]
    pub end: RecurrenceEnd,
    #[serde(default)]
    pub exceptions: Vec<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(start_date: NaiveDate, interval: TimeInterval) -> Self {
        Self {
            start_date,
            interval,
            end: RecurrenceEnd::Never,
            exceptions: Vec::new(),
        }
    }

    pub fn is_exception(&self, date: NaiveDate) -> bool {
        self.exceptions.contains(&date)
    }

    pub fn allows_occurrence(&self, occurrence_index: u32, candidate: NaiveDate) -> bool {
        if candidate < self.start_date {
            return false;
        }
        match &self.end {
            RecurrenceEnd::Never => true,
            RecurrenceEnd::OnDate(end_date) => candidate <= *end_date,
            RecurrenceEnd::AfterOccurrences(limit) => occurrence_index < *limit,
        }
    }

    /// Next scheduled date after `from`, skipping exception dates.
    pub fn next_occurrence(&self, from: NaiveDate) -> NaiveDate {
        let mut candidate = self.interval.next_date(from);
        let mut guard = 0usize;
        while self.is_exception(candidate) {
            candidate = self.interval.next_date(candidate);
            guard += 1;
            if guard >= 512 {
                break;
            }
        }
        candidate
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum RecurrenceEnd {
    #[default]
    Never,
    OnDate(NaiveDate),
    AfterOccurrences(u32),
}

fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    let day = date.day().min(days_in_month(year, date.month()));
    NaiveDate::from_ymd_opt(year, date.month(), day).unwrap_or(date)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}
