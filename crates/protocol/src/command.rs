//! Typed client -> server commands and their wire envelopes.
//!
//! Every operation on the scheduling channel is one numeric operation
//! code plus a JSON payload. [`Command`] is the tagged union over those
//! operations; the raw code survives only at the wire boundary in
//! [`Command::to_wire`] and [`OpCode::from_u16`], so call sites match on
//! variants and the compiler checks exhaustiveness.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use shiftboard_core::calendar::ViewGranularity;
use shiftboard_core::filters::ScheduleFilters;
use shiftboard_core::roles::Role;
use shiftboard_core::types::EntityId;

/// Operation codes understood by the scheduling server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum OpCode {
    /// Fetch the schedule window.
    FetchSchedule = 2001,
    /// Assign a worker to a shift.
    AssignWorker = 2002,
    /// Unassign a worker from a shift.
    UnassignWorker = 2003,
    /// Create a shift.
    CreateShift = 2004,
    /// Update a shift.
    UpdateShift = 2005,
    /// Delete a shift.
    DeleteShift = 2006,
}

impl OpCode {
    /// Map a raw wire code to a known operation.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            2001 => Some(OpCode::FetchSchedule),
            2002 => Some(OpCode::AssignWorker),
            2003 => Some(OpCode::UnassignWorker),
            2004 => Some(OpCode::CreateShift),
            2005 => Some(OpCode::UpdateShift),
            2006 => Some(OpCode::DeleteShift),
            _ => None,
        }
    }

    /// The numeric wire value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether a success response should trigger a schedule reload.
    pub fn is_mutation(self) -> bool {
        !matches!(self, OpCode::FetchSchedule)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_u16())
    }
}

/// A command bound for the scheduling server.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchSchedule(FetchSchedule),
    AssignWorker(AssignWorker),
    UnassignWorker(UnassignWorker),
    CreateShift(CreateShift),
    UpdateShift(UpdateShift),
    DeleteShift(DeleteShift),
}

impl Command {
    /// The operation code this command dispatches under.
    pub fn op_code(&self) -> OpCode {
        match self {
            Command::FetchSchedule(_) => OpCode::FetchSchedule,
            Command::AssignWorker(_) => OpCode::AssignWorker,
            Command::UnassignWorker(_) => OpCode::UnassignWorker,
            Command::CreateShift(_) => OpCode::CreateShift,
            Command::UpdateShift(_) => OpCode::UpdateShift,
            Command::DeleteShift(_) => OpCode::DeleteShift,
        }
    }

    /// Serialize to the `{"request_id": <code>, "data": {...}}` envelope.
    pub fn to_wire(&self) -> Result<String, serde_json::Error> {
        let data = match self {
            Command::FetchSchedule(payload) => serde_json::to_value(payload)?,
            Command::AssignWorker(payload) => serde_json::to_value(payload)?,
            Command::UnassignWorker(payload) => serde_json::to_value(payload)?,
            Command::CreateShift(payload) => serde_json::to_value(payload)?,
            Command::UpdateShift(payload) => serde_json::to_value(payload)?,
            Command::DeleteShift(payload) => serde_json::to_value(payload)?,
        };
        let envelope = serde_json::json!({
            "request_id": self.op_code().as_u16(),
            "data": data,
        });
        serde_json::to_string(&envelope)
    }
}

/// Payload of [`OpCode::FetchSchedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub view_type: ViewGranularity,
    #[serde(default, skip_serializing_if = "ScheduleFilters::is_empty")]
    pub filters: ScheduleFilters,
}

/// Payload of [`OpCode::AssignWorker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignWorker {
    pub shift_id: EntityId,
    pub worker_id: EntityId,
    pub role_assigned: Role,
}

/// Payload of [`OpCode::UnassignWorker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnassignWorker {
    pub shift_id: EntityId,
    pub worker_id: EntityId,
    pub role_assigned: Role,
}

/// Payload of [`OpCode::CreateShift`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateShift {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<EntityId>,
    pub shift_start_datetime: NaiveDateTime,
    pub shift_end_datetime: NaiveDateTime,
    #[serde(default)]
    pub role_requirements: BTreeMap<Role, u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_po_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// When present, the server rosters this worker onto the new shift
    /// in the same operation, so it arrives already staffed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_assign_worker: Option<AutoAssign>,
}

/// Embedded auto-assignment instruction on a create.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoAssign {
    pub worker_id: EntityId,
    pub role_assigned: Role,
}

/// Payload of [`OpCode::UpdateShift`]. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateShift {
    pub shift_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_start_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_end_datetime: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_requirements: Option<BTreeMap<Role, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_po_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Payload of [`OpCode::DeleteShift`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeleteShift {
    pub shift_id: EntityId,
}
