//! Month view: full weeks of date cells, padded with adjacent months.

use chrono::NaiveDate;
use serde::Serialize;

use shiftboard_core::aggregate::ScheduleIndex;
use shiftboard_core::calendar::{month_grid, Bucket, DAYS_PER_WEEK};
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_core::shift::{Job, Shift};

use super::card::ShiftCard;
use super::{cards_at, unscheduled_tray};

/// Render model for the month view.
#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub anchor: NaiveDate,
    /// Rows of exactly seven cells each.
    pub weeks: Vec<Vec<MonthCell>>,
    pub unscheduled: Vec<ShiftCard>,
}

/// One date cell. Padding cells carry `bucket.other_month` but remain
/// drop targets like any other.
#[derive(Debug, Clone, Serialize)]
pub struct MonthCell {
    pub bucket: Bucket,
    pub cards: Vec<ShiftCard>,
}

pub fn build(
    anchor: NaiveDate,
    index: &ScheduleIndex,
    shifts: &[Shift],
    jobs: &[Job],
    filters: &ScheduleFilters,
) -> MonthView {
    let weeks = month_grid(anchor)
        .chunks(DAYS_PER_WEEK as usize)
        .map(|row| {
            row.iter()
                .map(|bucket| MonthCell {
                    bucket: *bucket,
                    cards: cards_at(bucket, index, shifts, jobs, filters),
                })
                .collect()
        })
        .collect();

    MonthView {
        anchor,
        weeks,
        unscheduled: unscheduled_tray(index, shifts, jobs, filters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_view_rows_have_seven_cells() {
        let shifts: Vec<Shift> = serde_json::from_str(
            r#"[
                {"id": 1, "shift_start_datetime": "2024-03-20T09:00:00"},
                {"id": 2, "shift_start_datetime": "2024-03-20T14:00:00"}
            ]"#,
        )
        .unwrap();
        let index = ScheduleIndex::build(&shifts);
        let view = build(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &index,
            &shifts,
            &[],
            &ScheduleFilters::default(),
        );

        assert!(view.weeks.iter().all(|row| row.len() == 7));

        // Both shifts collapse onto the March 20 cell, in hour order.
        let cell = view
            .weeks
            .iter()
            .flatten()
            .find(|cell| cell.bucket.date == chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
            .unwrap();
        assert_eq!(cell.cards.len(), 2);
        assert_eq!(cell.cards[0].shift_id, Some(1));
        assert!(!cell.bucket.other_month);
    }

    #[test]
    fn padding_cells_are_flagged_but_present() {
        let view = build(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            &ScheduleIndex::build(&[]),
            &[],
            &[],
            &ScheduleFilters::default(),
        );
        let first = &view.weeks[0][0];
        assert_eq!(
            first.bucket.date,
            chrono::NaiveDate::from_ymd_opt(2024, 2, 25).unwrap()
        );
        assert!(first.bucket.other_month);
    }
}
