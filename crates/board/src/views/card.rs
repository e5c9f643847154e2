//! The shift card: one shift as rendered on any view.

use serde::Serialize;

use shiftboard_core::shift::Shift;
use shiftboard_core::staffing::StaffingSummary;
use shiftboard_core::types::EntityId;

/// Render model for one shift card.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftCard {
    pub shift_id: Option<EntityId>,
    pub job_id: Option<EntityId>,
    /// `"09:00-13:00"`, or `"unscheduled"` when no window is set.
    pub time_label: String,
    /// Recomputed on every build, never cached.
    pub staffing: StaffingSummary,
    /// Roster names in assignment order.
    pub worker_names: Vec<String>,
    pub client_po_number: Option<String>,
}

impl ShiftCard {
    pub fn from_shift(shift: &Shift) -> Self {
        Self {
            shift_id: shift.id,
            job_id: shift.job_id,
            time_label: time_label(shift),
            staffing: StaffingSummary::for_shift(shift),
            worker_names: shift
                .assigned_workers
                .iter()
                .map(|entry| entry.name.clone())
                .collect(),
            client_po_number: shift.client_po_number.clone(),
        }
    }
}

fn time_label(shift: &Shift) -> String {
    match (shift.shift_start_datetime, shift.shift_end_datetime) {
        (Some(start), Some(end)) => {
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        (Some(start), None) => start.format("%H:%M").to_string(),
        _ => "unscheduled".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftboard_core::staffing::StaffingStatus;

    #[test]
    fn card_carries_time_label_and_staffing() {
        let shift: Shift = serde_json::from_str(
            r#"{
                "id": 31,
                "shift_start_datetime": "2024-03-04T09:00:00",
                "shift_end_datetime": "2024-03-04T13:00:00",
                "role_requirements": {"stagehand": 2},
                "assigned_workers": [
                    {"user_id": 9, "role_assigned": "stagehand", "name": "Dana Reyes"}
                ]
            }"#,
        )
        .unwrap();
        let card = ShiftCard::from_shift(&shift);
        assert_eq!(card.time_label, "09:00-13:00");
        assert_eq!(card.staffing.status, StaffingStatus::Understaffed);
        assert_eq!(card.worker_names, vec!["Dana Reyes".to_string()]);
    }

    #[test]
    fn card_without_window_reads_unscheduled() {
        let shift: Shift = serde_json::from_str(r#"{"id": 31}"#).unwrap();
        assert_eq!(ShiftCard::from_shift(&shift).time_label, "unscheduled");
    }
}
