use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::PapayaError;

use super::stem::days_in_month;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar conventions that parameterize window computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarPolicy {
    pub week_start: Weekday,
    /// First month (1-12) of the fiscal year; fiscal windows are the
    /// three-month quarters counted from it.
    pub fiscal_start_month: u32,
}

impl Default for CalendarPolicy {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            fiscal_start_month: 1,
        }
    }
}

/// A calendar window, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PapayaError> {
        if end < start {
            return Err(PapayaError::InvalidInput(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Direction for stepping a view to the adjacent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Back,
    Forward,
}

/// Discriminated descriptor of a requested calendar window.
///
/// Lower-granularity variants omit fields irrelevant to their scope: an
/// annual view carries no month or day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DateView {
    Annual {
        year: i32,
    },
    Monthly {
        year: i32,
        month: u32,
    },
    Weekly {
        year: i32,
        month: u32,
        day: u32,
    },
    Daily {
        year: i32,
        month: u32,
        day: u32,
    },
    Fiscal {
        year: i32,
        month: u32,
        day: u32,
    },
    Custom {
        after: Option<NaiveDate>,
        before: Option<NaiveDate>,
    },
}

impl DateView {
    /// Anchor day for the day-shaped variants.
    fn anchor(&self) -> Option<NaiveDate> {
        match *self {
            DateView::Weekly { year, month, day }
            | DateView::Daily { year, month, day }
            | DateView::Fiscal { year, month, day } => {
                NaiveDate::from_ymd_opt(year, month, day)
            }
            _ => None,
        }
    }

    /// The bounded calendar window for this view, or `None` for `Custom`
    /// (whose bounds may be open-ended) and for unrepresentable dates.
    pub fn window(&self, calendar: &CalendarPolicy) -> Option<DateWindow> {
        match *self {
            DateView::Annual { year } => {
                let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
                let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
                Some(DateWindow { start, end })
            }
            DateView::Monthly { year, month } => {
                let start = NaiveDate::from_ymd_opt(year, month, 1)?;
                let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
                Some(DateWindow { start, end })
            }
            DateView::Weekly { .. } => {
                let anchor = self.anchor()?;
                let offset = (anchor.weekday().num_days_from_monday() + 7
                    - calendar.week_start.num_days_from_monday())
                    % 7;
                let start = anchor - Duration::days(offset as i64);
                Some(DateWindow {
                    start,
                    end: start + Duration::days(6),
                })
            }
            DateView::Daily { .. } => self.anchor().map(DateWindow::single),
            DateView::Fiscal { .. } => fiscal_quarter(self.anchor()?, calendar),
            DateView::Custom { .. } => None,
        }
    }

    /// Lower and upper inclusive bounds, either of which may be open for the
    /// custom variant. `None` overall means the view names an unrepresentable
    /// window and matches nothing.
    #[allow(clippy::type_complexity)]
    pub fn bounds(
        &self,
        calendar: &CalendarPolicy,
    ) -> Option<(Option<NaiveDate>, Option<NaiveDate>)> {
        match *self {
            DateView::Custom { after, before } => Some((after, before)),
            _ => self
                .window(calendar)
                .map(|window| (Some(window.start), Some(window.end))),
        }
    }

    /// Whether `date` falls inside this view's window, boundaries included.
    pub fn contains(&self, date: NaiveDate, calendar: &CalendarPolicy) -> bool {
        match self.bounds(calendar) {
            Some((after, before)) => {
                after.map_or(true, |lo| date >= lo) && before.map_or(true, |hi| date <= hi)
            }
            None => false,
        }
    }

    /// The adjacent window of the same granularity, or `None` when the view
    /// does not navigate (custom ranges) or the date cannot be represented.
    pub fn step(&self, direction: StepDirection, calendar: &CalendarPolicy) -> Option<DateView> {
        let sign: i32 = match direction {
            StepDirection::Back => -1,
            StepDirection::Forward => 1,
        };
        match *self {
            DateView::Annual { year } => Some(DateView::Annual { year: year + sign }),
            DateView::Monthly { year, month } => {
                let (year, month) = add_months(year, month, sign);
                Some(DateView::Monthly { year, month })
            }
            DateView::Weekly { .. } => {
                let anchor = self.anchor()? + Duration::days(7 * sign as i64);
                Some(DateView::Weekly {
                    year: anchor.year(),
                    month: anchor.month(),
                    day: anchor.day(),
                })
            }
            DateView::Daily { .. } => {
                let anchor = self.anchor()? + Duration::days(sign as i64);
                Some(DateView::Daily {
                    year: anchor.year(),
                    month: anchor.month(),
                    day: anchor.day(),
                })
            }
            DateView::Fiscal { .. } => {
                let start = fiscal_quarter(self.anchor()?, calendar)?.start;
                let (year, month) = add_months(start.year(), start.month(), 3 * sign);
                Some(DateView::Fiscal {
                    year,
                    month,
                    day: 1,
                })
            }
            DateView::Custom { .. } => None,
        }
    }

    /// Encodes the view as routing path segments: a short variant token
    /// (`y`, `m`, `w`, `d`, `f`, `r`) followed by its numeric fields, with
    /// `-` marking an open custom bound.
    pub fn encode(&self) -> Vec<String> {
        match *self {
            DateView::Annual { year } => vec!["y".into(), year.to_string()],
            DateView::Monthly { year, month } => {
                vec!["m".into(), year.to_string(), month.to_string()]
            }
            DateView::Weekly { year, month, day } => {
                vec![
                    "w".into(),
                    year.to_string(),
                    month.to_string(),
                    day.to_string(),
                ]
            }
            DateView::Daily { year, month, day } => {
                vec![
                    "d".into(),
                    year.to_string(),
                    month.to_string(),
                    day.to_string(),
                ]
            }
            DateView::Fiscal { year, month, day } => {
                vec![
                    "f".into(),
                    year.to_string(),
                    month.to_string(),
                    day.to_string(),
                ]
            }
            DateView::Custom { after, before } => {
                vec![
                    "r".into(),
                    encode_custom_bound(after),
                    encode_custom_bound(before),
                ]
            }
        }
    }

    /// Decodes routing path segments back into a view. Any unrecognized
    /// token, arity mismatch, or out-of-range date yields `None`; callers
    /// redirect to their default listing route.
    pub fn decode(segments: &[&str]) -> Option<DateView> {
        let (&token, rest) = segments.split_first()?;
        match token {
            "y" => {
                let [year] = rest else { return None };
                let year = year.parse::<i32>().ok()?;
                NaiveDate::from_ymd_opt(year, 1, 1)?;
                Some(DateView::Annual { year })
            }
            "m" => {
                let [year, month] = rest else { return None };
                let year = year.parse::<i32>().ok()?;
                let month = month.parse::<u32>().ok()?;
                NaiveDate::from_ymd_opt(year, month, 1)?;
                Some(DateView::Monthly { year, month })
            }
            "w" | "d" | "f" => {
                let [year, month, day] = rest else { return None };
                let year = year.parse::<i32>().ok()?;
                let month = month.parse::<u32>().ok()?;
                let day = day.parse::<u32>().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)?;
                Some(match token {
                    "w" => DateView::Weekly { year, month, day },
                    "d" => DateView::Daily { year, month, day },
                    _ => DateView::Fiscal { year, month, day },
                })
            }
            "r" => {
                let [after, before] = rest else { return None };
                Some(DateView::Custom {
                    after: decode_custom_bound(after)?,
                    before: decode_custom_bound(before)?,
                })
            }
            _ => None,
        }
    }
}

fn encode_custom_bound(bound: Option<NaiveDate>) -> String {
    match bound {
        Some(date) => date.format(ISO_DATE_FORMAT).to_string(),
        None => "-".into(),
    }
}

fn decode_custom_bound(segment: &str) -> Option<Option<NaiveDate>> {
    if segment == "-" {
        return Some(None);
    }
    NaiveDate::parse_from_str(segment, ISO_DATE_FORMAT)
        .ok()
        .map(Some)
}

/// The three-month fiscal quarter containing `anchor`, with quarters counted
/// from the fiscal year's start month.
fn fiscal_quarter(anchor: NaiveDate, calendar: &CalendarPolicy) -> Option<DateWindow> {
    let start_month = calendar.fiscal_start_month.clamp(1, 12) as i32;
    let months_into_year = (anchor.month() as i32 - start_month).rem_euclid(12);
    let months_into_quarter = months_into_year % 3;
    let (start_year, start_month) =
        add_months(anchor.year(), anchor.month(), -months_into_quarter);
    let (end_year, end_month) = add_months(start_year, start_month, 2);
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)?;
    let end = NaiveDate::from_ymd_opt(end_year, end_month, days_in_month(end_year, end_month))?;
    Some(DateWindow { start, end })
}

fn add_months(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), (index.rem_euclid(12) + 1) as u32)
}
