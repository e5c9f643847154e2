//! Week view: seven day columns of hour slots, Sunday through Saturday.

use chrono::NaiveDate;
use serde::Serialize;

use shiftboard_core::aggregate::ScheduleIndex;
use shiftboard_core::calendar::{day_hours, week_days};
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_core::shift::{Job, Shift};

use super::card::ShiftCard;
use super::day::HourRow;
use super::{cards_at, unscheduled_tray};

/// Render model for the week view.
#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    /// Always seven columns, starting on Sunday.
    pub days: Vec<DayColumn>,
    pub unscheduled: Vec<ShiftCard>,
}

/// One day column with its 24 hour slots.
#[derive(Debug, Clone, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub hours: Vec<HourRow>,
}

pub fn build(
    anchor: NaiveDate,
    index: &ScheduleIndex,
    shifts: &[Shift],
    jobs: &[Job],
    filters: &ScheduleFilters,
) -> WeekView {
    let days = week_days(anchor)
        .into_iter()
        .map(|day| DayColumn {
            date: day.date,
            hours: day_hours(day.date)
                .into_iter()
                .map(|bucket| HourRow {
                    cards: cards_at(&bucket, index, shifts, jobs, filters),
                    bucket,
                })
                .collect(),
        })
        .collect();

    WeekView {
        days,
        unscheduled: unscheduled_tray(index, shifts, jobs, filters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use chrono::Datelike;

    #[test]
    fn week_view_spans_sunday_to_saturday() {
        let shifts: Vec<Shift> = serde_json::from_str(
            r#"[{"id": 1, "shift_start_datetime": "2024-03-04T09:00:00"}]"#,
        )
        .unwrap();
        let index = ScheduleIndex::build(&shifts);
        let view = build(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 6).unwrap(),
            &index,
            &shifts,
            &[],
            &ScheduleFilters::default(),
        );

        assert_eq!(view.days.len(), 7);
        assert_eq!(view.days[0].date.weekday(), Weekday::Sun);
        // 2024-03-04 is the Monday column.
        assert_eq!(view.days[1].hours[9].cards.len(), 1);
        assert_eq!(view.days[1].hours[9].cards[0].shift_id, Some(1));
    }

    #[test]
    fn filters_apply_at_build_time() {
        let shifts: Vec<Shift> = serde_json::from_str(
            r#"[
                {"id": 1, "job_id": 5, "shift_start_datetime": "2024-03-04T09:00:00"},
                {"id": 2, "job_id": 6, "shift_start_datetime": "2024-03-04T09:00:00"}
            ]"#,
        )
        .unwrap();
        let index = ScheduleIndex::build(&shifts);
        let filters = ScheduleFilters {
            job_id: Some(5),
            ..Default::default()
        };
        let view = build(
            chrono::NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            &index,
            &shifts,
            &[],
            &filters,
        );

        let cards = &view.days[1].hours[9].cards;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].shift_id, Some(1));
    }
}
