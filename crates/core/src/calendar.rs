//! Calendar grid generation for the three board granularities.
//!
//! All functions here are pure: the same anchor and granularity always
//! produce the same bucket sequence, and any date is valid input.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Hour rows rendered in a day or week column.
pub const HOURS_PER_DAY: u32 = 24;

/// Days in one board week (Sunday..Saturday).
pub const DAYS_PER_WEEK: u64 = 7;

/// The zoom level of the scheduling board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewGranularity {
    Day,
    Week,
    Month,
}

/// One calendar cell shifts are grouped into for rendering and drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub date: NaiveDate,
    /// Hour of day for day/week grids; `None` for month cells.
    pub hour: Option<u32>,
    /// Set on month-grid padding cells belonging to an adjacent month.
    /// Padding cells are rendered dimmed but stay valid drop targets.
    pub other_month: bool,
}

impl Bucket {
    /// The instant this bucket starts (midnight when no hour applies).
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(hour_time(self.hour.unwrap_or(0)))
    }
}

/// Ordered buckets for an anchor date at a given granularity.
pub fn build_grid(anchor: NaiveDate, granularity: ViewGranularity) -> Vec<Bucket> {
    match granularity {
        ViewGranularity::Day => day_hours(anchor),
        ViewGranularity::Week => week_days(anchor),
        ViewGranularity::Month => month_grid(anchor),
    }
}

/// 24 hourly buckets sharing the anchor's calendar date.
pub fn day_hours(anchor: NaiveDate) -> Vec<Bucket> {
    (0..HOURS_PER_DAY)
        .map(|hour| Bucket {
            date: anchor,
            hour: Some(hour),
            other_month: false,
        })
        .collect()
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

/// The seven dates of the Sunday..Saturday week containing the anchor.
pub fn week_days(anchor: NaiveDate) -> Vec<Bucket> {
    let start = week_start(anchor);
    (0..DAYS_PER_WEEK)
        .map(|offset| Bucket {
            date: start + Days::new(offset),
            hour: None,
            other_month: false,
        })
        .collect()
}

/// Full-week month grid for the anchor's month.
///
/// Runs from the Sunday on/before the 1st through the Saturday on/after
/// the last day, so the cell count is always a multiple of seven and the
/// grid renders as a rectangle.
pub fn month_grid(anchor: NaiveDate) -> Vec<Bucket> {
    let (start, end) = month_range(anchor);
    let mut buckets = Vec::new();
    let mut date = start;
    while date <= end {
        buckets.push(Bucket {
            date,
            hour: None,
            other_month: date.month() != anchor.month() || date.year() != anchor.year(),
        });
        date = date + Days::new(1);
    }
    buckets
}

/// Inclusive date range a schedule fetch must cover for this view.
pub fn visible_range(anchor: NaiveDate, granularity: ViewGranularity) -> (NaiveDate, NaiveDate) {
    match granularity {
        ViewGranularity::Day => (anchor, anchor),
        ViewGranularity::Week => {
            let start = week_start(anchor);
            (start, start + Days::new(DAYS_PER_WEEK - 1))
        }
        ViewGranularity::Month => month_range(anchor),
    }
}

/// Move the anchor forward (positive) or back (negative) by whole views.
pub fn step_anchor(anchor: NaiveDate, granularity: ViewGranularity, steps: i32) -> NaiveDate {
    match granularity {
        ViewGranularity::Day => add_days(anchor, i64::from(steps)),
        ViewGranularity::Week => add_days(anchor, i64::from(steps) * DAYS_PER_WEEK as i64),
        ViewGranularity::Month => {
            let months = Months::new(steps.unsigned_abs());
            let stepped = if steps >= 0 {
                anchor.checked_add_months(months)
            } else {
                anchor.checked_sub_months(months)
            };
            stepped.unwrap_or(anchor)
        }
    }
}

// ---- private helpers ----

fn month_range(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let last = last_day_of_month(anchor);
    (week_start(first), week_start(last) + Days::new(DAYS_PER_WEEK - 1))
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    match first_of_next {
        Some(first) => first - Days::new(1),
        // `from_ymd_opt` only fails past chrono's representable years.
        None => date,
    }
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date + Days::new(days as u64)
    } else {
        date - Days::new(days.unsigned_abs())
    }
}

fn hour_time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}
