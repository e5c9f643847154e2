//! Domain entities exchanged with the scheduling server.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::EntityId;

/// A span of work for a job, with role requirements and a worker roster.
///
/// Never patched piecemeal on the client: every confirmed mutation is
/// followed by a wholesale reload from the authoritative response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    /// Absent until the server has created the shift.
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub job_id: Option<EntityId>,
    /// Wall-clock start in the board's display timezone.
    #[serde(default)]
    pub shift_start_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub shift_end_datetime: Option<NaiveDateTime>,
    /// Role -> required headcount. Absent roles require zero.
    #[serde(default)]
    pub role_requirements: BTreeMap<Role, u32>,
    #[serde(default)]
    pub assigned_workers: Vec<AssignedWorker>,
    #[serde(default)]
    pub client_po_number: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// One roster entry on a shift.
///
/// `role_assigned` is not required to match a requirement key; assigning
/// under an unrequested role is representable and not rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedWorker {
    pub user_id: EntityId,
    pub role_assigned: Role,
    pub name: String,
}

/// Read-only directory entry for a person available for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: EntityId,
    pub name: String,
    /// Primary role; drives the default role on drag-assign.
    #[serde(default)]
    pub employee_type: Option<Role>,
    /// Capability flags, matched against role wire names.
    #[serde(default)]
    pub certifications: Vec<String>,
    /// Advisory 0-100 score.
    #[serde(default)]
    pub availability_score: u8,
    /// Advisory load indicator.
    #[serde(default)]
    pub current_shifts_count: u32,
    /// Unavailable workers are not draggable.
    #[serde(default = "default_true")]
    pub is_available: bool,
}

impl Worker {
    /// Whether this worker's certifications cover `role`.
    pub fn is_certified_for(&self, role: Role) -> bool {
        self.certifications.iter().any(|c| c == role.as_str())
    }
}

/// Read-only job directory entry used by the editor's job selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub client_company_id: Option<EntityId>,
    #[serde(default)]
    pub client_company_name: Option<String>,
}

fn default_true() -> bool {
    true
}
