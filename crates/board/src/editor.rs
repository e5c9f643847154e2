//! Shift detail editor: create/edit form state.
//!
//! The editor never talks to the channel itself. It validates locally,
//! builds commands, and leaves dispatching (and the reload that follows)
//! to the board session. Assign/unassign are independent sub-actions in
//! edit mode; they do not ride on save.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use shiftboard_core::roles::Role;
use shiftboard_core::shift::{AssignedWorker, Shift, Worker};
use shiftboard_core::staffing::rank_candidates;
use shiftboard_core::types::EntityId;
use shiftboard_protocol::command::{
    AssignWorker, Command, CreateShift, DeleteShift, UnassignWorker, UpdateShift,
};

use crate::error::BoardError;

/// Whether the editor is creating a new shift or editing a loaded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(EntityId),
}

/// Form state for the shift detail editor.
#[derive(Debug, Clone)]
pub struct ShiftEditor {
    mode: EditorMode,
    pub job_id: Option<EntityId>,
    pub client_po_number: Option<String>,
    pub special_instructions: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub role_requirements: BTreeMap<Role, u32>,
    roster: Vec<AssignedWorker>,
}

impl ShiftEditor {
    /// Open the editor empty, in create mode.
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            job_id: None,
            client_po_number: None,
            special_instructions: None,
            start: None,
            end: None,
            role_requirements: BTreeMap::new(),
            roster: Vec::new(),
        }
    }

    /// Open the editor prefilled from a loaded shift, in edit mode.
    pub fn edit(shift: &Shift) -> Result<Self, BoardError> {
        let id = shift.id.ok_or_else(|| {
            BoardError::Validation("Cannot edit a shift the server has not created".to_string())
        })?;
        Ok(Self {
            mode: EditorMode::Edit(id),
            job_id: shift.job_id,
            client_po_number: shift.client_po_number.clone(),
            special_instructions: shift.special_instructions.clone(),
            start: shift.shift_start_datetime,
            end: shift.shift_end_datetime,
            role_requirements: shift.role_requirements.clone(),
            roster: shift.assigned_workers.clone(),
        })
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Current roster snapshot shown in edit mode.
    pub fn roster(&self) -> &[AssignedWorker] {
        &self.roster
    }

    /// Set the required headcount for a role. Zero removes the row.
    pub fn set_requirement(&mut self, role: Role, count: u32) {
        if count == 0 {
            self.role_requirements.remove(&role);
        } else {
            self.role_requirements.insert(role, count);
        }
    }

    /// Validate the form ahead of a save.
    ///
    /// The time window must be present with `end > start`, and a create
    /// needs a job picked. Checked here so a bad window never reaches the
    /// server.
    pub fn validate(&self) -> Result<(), BoardError> {
        self.window()?;
        if self.mode == EditorMode::Create && self.job_id.is_none() {
            return Err(BoardError::Validation(
                "Pick a job before creating a shift".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the save command: create or update, depending on mode.
    pub fn save_command(&self) -> Result<Command, BoardError> {
        self.validate()?;
        let (start, end) = self.window()?;
        let command = match self.mode {
            EditorMode::Create => Command::CreateShift(CreateShift {
                job_id: self.job_id,
                shift_start_datetime: start,
                shift_end_datetime: end,
                role_requirements: self.role_requirements.clone(),
                client_po_number: self.client_po_number.clone(),
                special_instructions: self.special_instructions.clone(),
                auto_assign_worker: None,
            }),
            EditorMode::Edit(shift_id) => Command::UpdateShift(UpdateShift {
                shift_id,
                job_id: self.job_id,
                shift_start_datetime: Some(start),
                shift_end_datetime: Some(end),
                role_requirements: Some(self.role_requirements.clone()),
                client_po_number: self.client_po_number.clone(),
                special_instructions: self.special_instructions.clone(),
            }),
        };
        Ok(command)
    }

    /// Assign a worker to the shift being edited.
    ///
    /// Independent of save; only valid in edit mode.
    pub fn assign_command(&self, worker: &Worker, role: Role) -> Result<Command, BoardError> {
        let shift_id = self.edit_id("assign a worker")?;
        Ok(Command::AssignWorker(AssignWorker {
            shift_id,
            worker_id: worker.id,
            role_assigned: role,
        }))
    }

    /// Remove a rostered worker from the shift being edited.
    pub fn unassign_command(&self, entry: &AssignedWorker) -> Result<Command, BoardError> {
        let shift_id = self.edit_id("unassign a worker")?;
        Ok(Command::UnassignWorker(UnassignWorker {
            shift_id,
            worker_id: entry.user_id,
            role_assigned: entry.role_assigned,
        }))
    }

    /// Delete the shift being edited. Irreversible from the board.
    pub fn delete_command(&self) -> Result<Command, BoardError> {
        let shift_id = self.edit_id("delete the shift")?;
        Ok(Command::DeleteShift(DeleteShift { shift_id }))
    }

    /// Workers eligible for assignment, ranked for `role`.
    ///
    /// Excludes anyone already on the roster. The ranking is advisory
    /// only; every returned worker stays assignable.
    pub fn assignable_pool<'a>(&self, workers: &'a [Worker], role: Role) -> Vec<&'a Worker> {
        let pool: Vec<&Worker> = workers
            .iter()
            .filter(|worker| {
                !self
                    .roster
                    .iter()
                    .any(|entry| entry.user_id == worker.id)
            })
            .collect();
        rank_candidates(&pool, role)
    }

    // ---- private helpers ----

    fn window(&self) -> Result<(NaiveDateTime, NaiveDateTime), BoardError> {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(BoardError::Validation(
                    "Start and end times are required".to_string(),
                ))
            }
        };
        if end <= start {
            return Err(BoardError::Validation(
                "Shift end must be after its start".to_string(),
            ));
        }
        Ok((start, end))
    }

    fn edit_id(&self, action: &str) -> Result<EntityId, BoardError> {
        match self.mode {
            EditorMode::Edit(id) => Ok(id),
            EditorMode::Create => Err(BoardError::Validation(format!(
                "Save the shift before trying to {action}"
            ))),
        }
    }
}
