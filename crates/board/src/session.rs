//! The board session: single owner of the loaded schedule window.

use chrono::NaiveDate;

use shiftboard_core::aggregate::ScheduleIndex;
use shiftboard_core::calendar::{self, Bucket, ViewGranularity};
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_core::shift::{Job, Shift, Worker};
use shiftboard_core::types::EntityId;
use shiftboard_protocol::command::{Command, FetchSchedule};
use shiftboard_protocol::response::SchedulePayload;

use crate::dragdrop::DragDropController;
use crate::editor::ShiftEditor;
use crate::error::BoardError;
use crate::transport::CommandTransport;
use crate::views::{day, month, week, DayView, MonthView, WeekView};

/// One manager's scheduling-board session.
///
/// Owns the loaded snapshot (shifts, workers, jobs) and the ephemeral
/// view state (anchor, granularity, filters, drag). No other component
/// mutates these; every change flows out as a command and back in as a
/// wholesale reload of the window.
pub struct ScheduleBoard<T: CommandTransport> {
    transport: T,
    anchor: NaiveDate,
    granularity: ViewGranularity,
    filters: ScheduleFilters,
    shifts: Vec<Shift>,
    workers: Vec<Worker>,
    jobs: Vec<Job>,
    index: ScheduleIndex,
    drag: DragDropController,
}

impl<T: CommandTransport> ScheduleBoard<T> {
    /// Create an empty session anchored at `anchor`.
    pub fn new(transport: T, anchor: NaiveDate, granularity: ViewGranularity) -> Self {
        Self {
            transport,
            anchor,
            granularity,
            filters: ScheduleFilters::default(),
            shifts: Vec::new(),
            workers: Vec::new(),
            jobs: Vec::new(),
            index: ScheduleIndex::default(),
            drag: DragDropController::new(),
        }
    }

    // ---- snapshot access ----

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn index(&self) -> &ScheduleIndex {
        &self.index
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn granularity(&self) -> ViewGranularity {
        self.granularity
    }

    pub fn filters(&self) -> &ScheduleFilters {
        &self.filters
    }

    // ---- loading ----

    /// Fetch the visible window and replace the whole snapshot.
    ///
    /// On any failure the previous snapshot stays untouched; the stale
    /// view self-heals on the next successful fetch.
    pub async fn reload(&mut self) -> Result<usize, BoardError> {
        let (start_date, end_date) = calendar::visible_range(self.anchor, self.granularity);
        let command = Command::FetchSchedule(FetchSchedule {
            start_date,
            end_date,
            view_type: self.granularity,
            filters: self.filters.clone(),
        });

        let envelope = self.transport.dispatch(&command).await?;
        let payload: SchedulePayload =
            envelope.data_as().map_err(BoardError::MalformedResponse)?;

        self.index = ScheduleIndex::build(&payload.shifts);
        self.shifts = payload.shifts;
        self.workers = payload.workers;
        self.jobs = payload.jobs;

        tracing::info!(
            shift_count = self.shifts.len(),
            start = %start_date,
            end = %end_date,
            "Schedule window loaded",
        );
        Ok(self.shifts.len())
    }

    /// Change the anchor date and reload.
    pub async fn set_anchor(&mut self, anchor: NaiveDate) -> Result<usize, BoardError> {
        self.anchor = anchor;
        self.reload().await
    }

    /// Switch granularity and reload.
    pub async fn set_granularity(
        &mut self,
        granularity: ViewGranularity,
    ) -> Result<usize, BoardError> {
        self.granularity = granularity;
        self.reload().await
    }

    /// Replace the filter set and reload.
    pub async fn set_filters(&mut self, filters: ScheduleFilters) -> Result<usize, BoardError> {
        self.filters = filters;
        self.reload().await
    }

    /// Step the anchor forward or back by whole views and reload.
    pub async fn step(&mut self, steps: i32) -> Result<usize, BoardError> {
        self.anchor = calendar::step_anchor(self.anchor, self.granularity, steps);
        self.reload().await
    }

    // ---- mutations ----

    /// Dispatch a command; confirmed mutations trigger a full reload.
    ///
    /// The reload is what makes interleaved in-flight mutations converge:
    /// responses never patch the snapshot, they only cause re-fetches.
    pub async fn submit(&mut self, command: Command) -> Result<(), BoardError> {
        let code = command.op_code();
        self.transport.dispatch(&command).await?;
        if code.is_mutation() {
            self.reload().await?;
        }
        Ok(())
    }

    // ---- drag and drop ----

    /// Begin dragging a worker from the directory panel.
    ///
    /// Returns false (and starts nothing) for unknown or unavailable
    /// workers.
    pub fn drag_start(&mut self, worker_id: EntityId) -> bool {
        match self.workers.iter().find(|worker| worker.id == worker_id) {
            Some(worker) => self.drag.drag_start(worker),
            None => false,
        }
    }

    /// End the drag without dropping.
    pub fn drag_end(&mut self) {
        self.drag.drag_end();
    }

    /// The worker currently being dragged, if any.
    pub fn dragged_worker(&self) -> Option<&Worker> {
        self.drag.dragged()
    }

    /// Drop the dragged worker on a bucket.
    ///
    /// Dispatches the assign-or-create command the controller decides on
    /// and reloads on success. Returns the issued command, or `None` when
    /// no drag was in flight.
    pub async fn drop_on(&mut self, bucket: &Bucket) -> Result<Option<Command>, BoardError> {
        let command = self
            .drag
            .drop_on(bucket, self.granularity, &self.index, &self.shifts);
        match command {
            Some(command) => {
                self.submit(command.clone()).await?;
                Ok(Some(command))
            }
            None => Ok(None),
        }
    }

    // ---- editor ----

    /// Open the editor for an existing shift in the loaded window.
    pub fn edit_shift(&self, shift_id: EntityId) -> Result<ShiftEditor, BoardError> {
        let shift = self
            .shifts
            .iter()
            .find(|shift| shift.id == Some(shift_id))
            .ok_or(BoardError::UnknownShift(shift_id))?;
        ShiftEditor::edit(shift)
    }

    // ---- view models ----

    pub fn day_view(&self) -> DayView {
        day::build(
            self.anchor,
            &self.index,
            &self.shifts,
            &self.jobs,
            &self.filters,
        )
    }

    pub fn week_view(&self) -> WeekView {
        week::build(
            self.anchor,
            &self.index,
            &self.shifts,
            &self.jobs,
            &self.filters,
        )
    }

    pub fn month_view(&self) -> MonthView {
        month::build(
            self.anchor,
            &self.index,
            &self.shifts,
            &self.jobs,
            &self.filters,
        )
    }
}
