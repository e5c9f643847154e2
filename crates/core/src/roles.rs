//! The closed set of crew roles a shift can require.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A crew role. The set is closed; the scheduling server knows no others.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Stagehand,
    CrewChief,
    ForkliftOperator,
    TruckDriver,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 4] = [
        Role::Stagehand,
        Role::CrewChief,
        Role::ForkliftOperator,
        Role::TruckDriver,
    ];

    /// The wire name (identical to the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Stagehand => "stagehand",
            Role::CrewChief => "crew_chief",
            Role::ForkliftOperator => "forklift_operator",
            Role::TruckDriver => "truck_driver",
        }
    }
}

impl Default for Role {
    /// Fallback role for workers with no primary role on file.
    fn default() -> Self {
        Role::Stagehand
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
