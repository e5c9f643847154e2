//! Day view: 24 hour rows for a single date.

use chrono::NaiveDate;
use serde::Serialize;

use shiftboard_core::aggregate::ScheduleIndex;
use shiftboard_core::calendar::{day_hours, Bucket};
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_core::shift::{Job, Shift};

use super::card::ShiftCard;
use super::{cards_at, unscheduled_tray};

/// Render model for the day view.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    pub hours: Vec<HourRow>,
    pub unscheduled: Vec<ShiftCard>,
}

/// One hour row with its cards. Empty rows are still drop targets.
#[derive(Debug, Clone, Serialize)]
pub struct HourRow {
    pub bucket: Bucket,
    pub cards: Vec<ShiftCard>,
}

pub fn build(
    date: NaiveDate,
    index: &ScheduleIndex,
    shifts: &[Shift],
    jobs: &[Job],
    filters: &ScheduleFilters,
) -> DayView {
    let hours = day_hours(date)
        .into_iter()
        .map(|bucket| HourRow {
            cards: cards_at(&bucket, index, shifts, jobs, filters),
            bucket,
        })
        .collect();

    DayView {
        date,
        hours,
        unscheduled: unscheduled_tray(index, shifts, jobs, filters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shifts() -> Vec<Shift> {
        serde_json::from_str(
            r#"[
                {"id": 1, "shift_start_datetime": "2024-03-04T09:00:00"},
                {"id": 2, "shift_start_datetime": "2024-03-05T09:00:00"},
                {"id": 3}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn day_view_places_cards_in_their_hour_row() {
        let shifts = shifts();
        let index = ScheduleIndex::build(&shifts);
        let view = build(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            &index,
            &shifts,
            &[],
            &ScheduleFilters::default(),
        );

        assert_eq!(view.hours.len(), 24);
        assert_eq!(view.hours[9].cards.len(), 1);
        assert_eq!(view.hours[9].cards[0].shift_id, Some(1));
        // The other date's shift does not leak in.
        assert!(view.hours.iter().map(|row| row.cards.len()).sum::<usize>() == 1);
        // The startless shift surfaces in the tray.
        assert_eq!(view.unscheduled.len(), 1);
        assert_eq!(view.unscheduled[0].shift_id, Some(3));
    }
}
