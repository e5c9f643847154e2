//! Ephemeral board filter state.
//!
//! Scoped to one board session with no persistence lifecycle. The set is
//! carried on schedule fetches and applied again locally at render time,
//! since the staffing-status filter keys on a derived value only the
//! client computes.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::shift::{Job, Shift};
use crate::staffing::{StaffingStatus, StaffingSummary};
use crate::types::EntityId;

/// Filter set applied to the schedule window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_company_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StaffingStatus>,
}

impl ScheduleFilters {
    /// True when no filter is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a shift passes every set filter.
    ///
    /// Shifts carry no client reference of their own, so the client filter
    /// resolves through the job directory the caller provides.
    pub fn matches_shift(&self, shift: &Shift, jobs: &[Job]) -> bool {
        if let Some(job_id) = self.job_id {
            if shift.job_id != Some(job_id) {
                return false;
            }
        }
        if let Some(client_id) = self.client_company_id {
            let job_client = shift
                .job_id
                .and_then(|id| jobs.iter().find(|job| job.id == id))
                .and_then(|job| job.client_company_id);
            if job_client != Some(client_id) {
                return false;
            }
        }
        if let Some(worker_id) = self.worker_id {
            if !shift
                .assigned_workers
                .iter()
                .any(|entry| entry.user_id == worker_id)
            {
                return false;
            }
        }
        if let Some(role) = self.role {
            let requires = shift.role_requirements.get(&role).copied().unwrap_or(0) > 0;
            let has_assignee = shift
                .assigned_workers
                .iter()
                .any(|entry| entry.role_assigned == role);
            if !requires && !has_assignee {
                return false;
            }
        }
        if let Some(status) = self.status {
            if StaffingSummary::for_shift(shift).status != status {
                return false;
            }
        }
        true
    }
}
