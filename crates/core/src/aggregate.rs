//! Grouping a flat shift list into calendar lookup buckets.
//!
//! The index is rebuilt wholesale on every load cycle; nothing here is
//! incremental. Date keys compare by calendar date in the board's display
//! timezone, not by instant.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};

use crate::shift::Shift;

/// Two-level lookup over a loaded shift list: date key -> hour -> shifts.
///
/// Entries hold positions into the slice the index was built from, in
/// input order, so the board's `Vec<Shift>` stays the single owner of
/// shift data.
#[derive(Debug, Default)]
pub struct ScheduleIndex {
    by_date: BTreeMap<NaiveDate, BTreeMap<u32, Vec<usize>>>,
    unscheduled: Vec<usize>,
}

impl ScheduleIndex {
    /// Build the index from a loaded shift list.
    ///
    /// Shifts without a start datetime cannot be placed in any time-keyed
    /// view; they are collected separately instead of being dropped.
    pub fn build(shifts: &[Shift]) -> Self {
        let mut index = Self::default();
        for (position, shift) in shifts.iter().enumerate() {
            match shift.shift_start_datetime {
                Some(start) => {
                    index
                        .by_date
                        .entry(start.date())
                        .or_default()
                        .entry(start.hour())
                        .or_default()
                        .push(position);
                }
                None => index.unscheduled.push(position),
            }
        }
        index
    }

    /// Shifts starting within a specific date+hour bucket.
    pub fn at_hour(&self, date: NaiveDate, hour: u32) -> &[usize] {
        self.by_date
            .get(&date)
            .and_then(|hours| hours.get(&hour))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All shifts on a date, ordered by hour then input order.
    pub fn on_date(&self, date: NaiveDate) -> Vec<usize> {
        self.by_date
            .get(&date)
            .map(|hours| hours.values().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// The first shift in bucket order at `date` (and `hour` when given).
    ///
    /// This is the drop controller's tie-break: first in bucket order,
    /// no disambiguation.
    pub fn first_at(&self, date: NaiveDate, hour: Option<u32>) -> Option<usize> {
        match hour {
            Some(hour) => self.at_hour(date, hour).first().copied(),
            None => self.on_date(date).into_iter().next(),
        }
    }

    /// Shifts that carry no start datetime.
    pub fn unscheduled(&self) -> &[usize] {
        &self.unscheduled
    }
}
