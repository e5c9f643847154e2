//! Drag-and-drop assignment controller.
//!
//! Pointer events arrive through a three-call interface
//! (`drag_start` / `drop_on` / `drag_end`), so the decision logic runs
//! identically with or without a real pointer device behind it.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use shiftboard_core::aggregate::ScheduleIndex;
use shiftboard_core::calendar::{Bucket, ViewGranularity};
use shiftboard_core::shift::{Shift, Worker};
use shiftboard_protocol::command::{AssignWorker, AutoAssign, Command, CreateShift};

/// Hours a drop-created shift spans in day and week views.
pub const DROP_SHIFT_HOURS: i64 = 4;

/// Wall-clock window for shifts created by a month-view drop.
pub const MONTH_DROP_START_HOUR: u32 = 9;
pub const MONTH_DROP_END_HOUR: u32 = 17;

/// Tracks the worker currently being dragged across the board.
#[derive(Debug, Default)]
pub struct DragDropController {
    dragged: Option<Worker>,
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging a worker.
    ///
    /// Unavailable workers are refused here, at drag-start, so a drop can
    /// never see one. Returns whether the drag actually started.
    pub fn drag_start(&mut self, worker: &Worker) -> bool {
        if !worker.is_available {
            tracing::debug!(worker_id = worker.id, "Refusing drag of unavailable worker");
            return false;
        }
        self.dragged = Some(worker.clone());
        true
    }

    /// The worker currently in flight, if any.
    pub fn dragged(&self) -> Option<&Worker> {
        self.dragged.as_ref()
    }

    /// End the drag without dropping.
    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    /// Drop the dragged worker onto a calendar bucket.
    ///
    /// With shifts already in the bucket, assigns to the first one in
    /// bucket order (no disambiguation). With an empty bucket, creates a
    /// shift over the default window with the worker auto-assigned so it
    /// arrives already staffed. The drag state clears either way; `None`
    /// means no drag was in flight.
    pub fn drop_on(
        &mut self,
        bucket: &Bucket,
        granularity: ViewGranularity,
        index: &ScheduleIndex,
        shifts: &[Shift],
    ) -> Option<Command> {
        let worker = self.dragged.take()?;
        let role = worker.employee_type.unwrap_or_default();

        let existing = index
            .first_at(bucket.date, bucket.hour)
            .and_then(|position| shifts.get(position))
            .and_then(|shift| shift.id);

        let command = match existing {
            Some(shift_id) => {
                tracing::debug!(
                    shift_id,
                    worker_id = worker.id,
                    role = %role,
                    "Drop assigns to the first shift in the bucket",
                );
                Command::AssignWorker(AssignWorker {
                    shift_id,
                    worker_id: worker.id,
                    role_assigned: role,
                })
            }
            None => {
                let (start, end) = drop_window(bucket, granularity);
                tracing::debug!(
                    worker_id = worker.id,
                    role = %role,
                    %start,
                    "Drop creates a new shift",
                );
                Command::CreateShift(CreateShift {
                    job_id: None,
                    shift_start_datetime: start,
                    shift_end_datetime: end,
                    role_requirements: [(role, 1)].into_iter().collect(),
                    client_po_number: None,
                    special_instructions: None,
                    auto_assign_worker: Some(AutoAssign {
                        worker_id: worker.id,
                        role_assigned: role,
                    }),
                })
            }
        };

        Some(command)
    }
}

/// Default time window for a shift created by dropping on `bucket`.
fn drop_window(bucket: &Bucket, granularity: ViewGranularity) -> (NaiveDateTime, NaiveDateTime) {
    match granularity {
        ViewGranularity::Day | ViewGranularity::Week => {
            let start = bucket.start();
            (start, start + Duration::hours(DROP_SHIFT_HOURS))
        }
        ViewGranularity::Month => (
            bucket.date.and_time(hour_time(MONTH_DROP_START_HOUR)),
            bucket.date.and_time(hour_time(MONTH_DROP_END_HOUR)),
        ),
    }
}

fn hour_time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shiftboard_core::roles::Role;

    fn worker(id: i64, role: Role, available: bool) -> Worker {
        Worker {
            id,
            name: format!("worker-{id}"),
            employee_type: Some(role),
            certifications: Vec::new(),
            availability_score: 50,
            current_shifts_count: 0,
            is_available: available,
        }
    }

    fn bucket(y: i32, m: u32, d: u32, hour: Option<u32>) -> Bucket {
        Bucket {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            hour,
            other_month: false,
        }
    }

    fn loaded_shift(id: i64, start_iso: &str) -> Shift {
        serde_json::from_str(&format!(
            r#"{{"id": {id}, "shift_start_datetime": "{start_iso}"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn drop_on_empty_week_bucket_creates_a_four_hour_shift() {
        let mut controller = DragDropController::new();
        assert!(controller.drag_start(&worker(7, Role::CrewChief, true)));

        let command = controller
            .drop_on(
                &bucket(2024, 3, 4, Some(9)),
                ViewGranularity::Week,
                &ScheduleIndex::build(&[]),
                &[],
            )
            .unwrap();

        match command {
            Command::CreateShift(create) => {
                assert_eq!(
                    create.shift_start_datetime.to_string(),
                    "2024-03-04 09:00:00"
                );
                assert_eq!(create.shift_end_datetime.to_string(), "2024-03-04 13:00:00");
                assert_eq!(create.role_requirements[&Role::CrewChief], 1);
                let auto = create.auto_assign_worker.unwrap();
                assert_eq!(auto.worker_id, 7);
                assert_eq!(auto.role_assigned, Role::CrewChief);
            }
            other => panic!("expected a create, got {other:?}"),
        }
        assert!(controller.dragged().is_none());
    }

    #[test]
    fn drop_on_occupied_bucket_assigns_to_the_first_shift() {
        let shifts = vec![
            loaded_shift(31, "2024-03-04T09:15:00"),
            loaded_shift(32, "2024-03-04T09:30:00"),
        ];
        let index = ScheduleIndex::build(&shifts);

        let mut controller = DragDropController::new();
        controller.drag_start(&worker(7, Role::Stagehand, true));

        let command = controller
            .drop_on(
                &bucket(2024, 3, 4, Some(9)),
                ViewGranularity::Week,
                &index,
                &shifts,
            )
            .unwrap();

        match command {
            Command::AssignWorker(assign) => {
                assert_eq!(assign.shift_id, 31);
                assert_eq!(assign.worker_id, 7);
                assert_eq!(assign.role_assigned, Role::Stagehand);
            }
            other => panic!("expected an assign, got {other:?}"),
        }
    }

    #[test]
    fn month_drop_spans_nine_to_five() {
        let mut controller = DragDropController::new();
        controller.drag_start(&worker(7, Role::TruckDriver, true));

        let command = controller
            .drop_on(
                &bucket(2024, 3, 20, None),
                ViewGranularity::Month,
                &ScheduleIndex::build(&[]),
                &[],
            )
            .unwrap();

        match command {
            Command::CreateShift(create) => {
                assert_eq!(
                    create.shift_start_datetime.to_string(),
                    "2024-03-20 09:00:00"
                );
                assert_eq!(create.shift_end_datetime.to_string(), "2024-03-20 17:00:00");
            }
            other => panic!("expected a create, got {other:?}"),
        }
    }

    #[test]
    fn month_drop_finds_shifts_anywhere_on_the_date() {
        let shifts = vec![loaded_shift(40, "2024-03-20T14:00:00")];
        let index = ScheduleIndex::build(&shifts);

        let mut controller = DragDropController::new();
        controller.drag_start(&worker(7, Role::Stagehand, true));

        let command = controller
            .drop_on(
                &bucket(2024, 3, 20, None),
                ViewGranularity::Month,
                &index,
                &shifts,
            )
            .unwrap();
        assert!(matches!(command, Command::AssignWorker(a) if a.shift_id == 40));
    }

    #[test]
    fn unavailable_worker_never_starts_a_drag() {
        let mut controller = DragDropController::new();
        assert!(!controller.drag_start(&worker(7, Role::Stagehand, false)));
        assert!(controller.dragged().is_none());

        let command = controller.drop_on(
            &bucket(2024, 3, 4, Some(9)),
            ViewGranularity::Week,
            &ScheduleIndex::build(&[]),
            &[],
        );
        assert!(command.is_none());
    }

    #[test]
    fn worker_without_a_role_defaults_to_stagehand() {
        let mut no_role = worker(7, Role::Stagehand, true);
        no_role.employee_type = None;

        let mut controller = DragDropController::new();
        controller.drag_start(&no_role);

        let command = controller
            .drop_on(
                &bucket(2024, 3, 4, Some(9)),
                ViewGranularity::Week,
                &ScheduleIndex::build(&[]),
                &[],
            )
            .unwrap();
        assert!(matches!(
            command,
            Command::CreateShift(c) if c.role_requirements.contains_key(&Role::Stagehand)
        ));
    }

    #[test]
    fn drag_end_clears_the_state() {
        let mut controller = DragDropController::new();
        controller.drag_start(&worker(7, Role::Stagehand, true));
        controller.drag_end();
        assert!(controller.dragged().is_none());
    }
}
