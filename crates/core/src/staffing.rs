//! Staffing reconciliation: required headcount against the assigned roster.
//!
//! The classification is derived on every render and never cached. It is
//! headcount-only: whether the assignees' roles actually match the
//! requirements is reported separately by [`role_mismatches`] and has no
//! effect on [`StaffingStatus`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::shift::{AssignedWorker, Shift, Worker};

/// Fill-level classification of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffingStatus {
    NoWorkers,
    Understaffed,
    FullyStaffed,
    Overstaffed,
}

/// Required vs assigned headcount for one role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCount {
    pub required: u32,
    pub assigned: u32,
}

/// Reconciliation result for a single shift.
#[derive(Debug, Clone, Serialize)]
pub struct StaffingSummary {
    pub required: u32,
    pub assigned: u32,
    pub status: StaffingStatus,
    pub per_role: BTreeMap<Role, RoleCount>,
}

impl StaffingSummary {
    /// Convenience wrapper over [`reconcile`] for a whole shift.
    pub fn for_shift(shift: &Shift) -> Self {
        reconcile(&shift.role_requirements, &shift.assigned_workers)
    }
}

/// Classify a (required, assigned) pair.
///
/// Total over all non-negative pairs. `assigned == 0` wins over the other
/// comparisons, so a shift requiring nothing with nobody on it reads as
/// `NoWorkers`, not `FullyStaffed`.
pub fn classify(required: u32, assigned: u32) -> StaffingStatus {
    if assigned == 0 {
        StaffingStatus::NoWorkers
    } else if assigned < required {
        StaffingStatus::Understaffed
    } else if assigned == required {
        StaffingStatus::FullyStaffed
    } else {
        StaffingStatus::Overstaffed
    }
}

/// Reconcile a shift's role requirements against its roster.
///
/// `per_role` lists every role with a non-zero requirement, plus any role
/// someone is assigned under (with `required: 0` when unrequested).
pub fn reconcile(
    requirements: &BTreeMap<Role, u32>,
    roster: &[AssignedWorker],
) -> StaffingSummary {
    let mut per_role: BTreeMap<Role, RoleCount> = BTreeMap::new();
    for (&role, &required) in requirements {
        if required > 0 {
            per_role.insert(
                role,
                RoleCount {
                    required,
                    assigned: 0,
                },
            );
        }
    }
    for entry in roster {
        per_role.entry(entry.role_assigned).or_default().assigned += 1;
    }

    let required: u32 = requirements.values().sum();
    let assigned = roster.len() as u32;
    StaffingSummary {
        required,
        assigned,
        status: classify(required, assigned),
        per_role,
    }
}

/// A role whose assigned headcount differs from its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMismatch {
    pub role: Role,
    pub required: u32,
    pub assigned: u32,
}

/// Per-role shortfalls and surpluses for a reconciled shift.
///
/// Additive indicator only; it never feeds [`StaffingStatus`].
pub fn role_mismatches(summary: &StaffingSummary) -> Vec<RoleMismatch> {
    summary
        .per_role
        .iter()
        .filter(|(_, count)| count.required != count.assigned)
        .map(|(&role, count)| RoleMismatch {
            role,
            required: count.required,
            assigned: count.assigned,
        })
        .collect()
}

/// Advisory ordering for an assignable-worker pool.
///
/// Exact role matches come first, then workers certified for the role,
/// then higher availability and lower current load. Any worker remains
/// assignable regardless of position.
pub fn rank_candidates<'a>(pool: &[&'a Worker], role: Role) -> Vec<&'a Worker> {
    let mut ranked = pool.to_vec();
    ranked.sort_by_key(|worker| {
        (
            worker.employee_type != Some(role),
            !worker.is_certified_for(role),
            std::cmp::Reverse(worker.availability_score),
            worker.current_shifts_count,
        )
    });
    ranked
}
