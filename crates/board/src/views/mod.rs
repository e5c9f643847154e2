//! Render models for the three board views.
//!
//! Plain data a front end can paint directly; no layout or styling
//! decisions live here. Filtering happens at build time, and every view
//! carries the unscheduled tray so shifts without a start datetime stay
//! visible.

pub mod card;
pub mod day;
pub mod month;
pub mod week;

pub use card::ShiftCard;
pub use day::{DayView, HourRow};
pub use month::{MonthCell, MonthView};
pub use week::{DayColumn, WeekView};

use shiftboard_core::aggregate::ScheduleIndex;
use shiftboard_core::calendar::Bucket;
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_core::shift::{Job, Shift};

/// Cards for the shifts in one bucket, filtered and in bucket order.
pub(crate) fn cards_at(
    bucket: &Bucket,
    index: &ScheduleIndex,
    shifts: &[Shift],
    jobs: &[Job],
    filters: &ScheduleFilters,
) -> Vec<ShiftCard> {
    let positions = match bucket.hour {
        Some(hour) => index.at_hour(bucket.date, hour).to_vec(),
        None => index.on_date(bucket.date),
    };
    positions
        .into_iter()
        .filter_map(|position| shifts.get(position))
        .filter(|shift| filters.matches_shift(shift, jobs))
        .map(ShiftCard::from_shift)
        .collect()
}

/// Cards for shifts with no start datetime.
pub(crate) fn unscheduled_tray(
    index: &ScheduleIndex,
    shifts: &[Shift],
    jobs: &[Job],
    filters: &ScheduleFilters,
) -> Vec<ShiftCard> {
    index
        .unscheduled()
        .iter()
        .filter_map(|&position| shifts.get(position))
        .filter(|shift| filters.matches_shift(shift, jobs))
        .map(ShiftCard::from_shift)
        .collect()
}
