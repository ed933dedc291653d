//! Enumerations - Enumerated types stored as TEXT columns

use serde::{Deserialize, Serialize};

// ********************* ENUMERATIONS **********************//

/// Role tiers gating which resources a session may reach
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Government,
    HospitalAdmin,
    DataEncoder,
    SuperUser,
}

impl Role {
    /// Roles pinned to a single hospital
    pub fn is_hospital_bound(&self) -> bool {
        matches!(self, Role::HospitalAdmin | Role::DataEncoder)
    }

    /// Roles allowed to look across every hospital
    pub fn has_global_view(&self) -> bool {
        matches!(self, Role::Government | Role::SuperUser)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Car,
    MedicalEquipment,
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffType {
    Doctor,
    Nurse,
}
