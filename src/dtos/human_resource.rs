//! Human resource DTOs

use crate::entities::{HumanResource, StaffType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct HumanResourceDTO {
    pub hr_id: i64,
    pub hospital_id: i64,
    pub staff_type: StaffType,
    pub specialization: Option<String>,
    pub headcount: i64,
    pub recorded_at: DateTime<Utc>,
}

impl From<HumanResource> for HumanResourceDTO {
    fn from(value: HumanResource) -> Self {
        Self {
            hr_id: value.hr_id,
            hospital_id: value.hospital_id,
            staff_type: value.staff_type,
            specialization: value.specialization,
            headcount: value.headcount,
            recorded_at: value.recorded_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateHumanResourceDTO {
    pub hospital_id: i64,
    pub staff_type: StaffType,

    #[validate(length(min = 1, max = 120))]
    pub specialization: Option<String>,

    #[validate(range(min = 0, message = "Headcount cannot be negative"))]
    pub headcount: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateHumanResourceDTO {
    pub staff_type: Option<StaffType>,

    #[validate(length(min = 1, max = 120))]
    pub specialization: Option<String>,

    #[validate(range(min = 0, message = "Headcount cannot be negative"))]
    pub headcount: Option<i64>,
}
