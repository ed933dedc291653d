//! HumanResource entity - Doctor/nurse headcount entry

use super::enums::StaffType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct HumanResource {
    pub hr_id: i64,
    pub hospital_id: i64,
    pub staff_type: StaffType,
    pub specialization: Option<String>,
    pub headcount: i64,
    pub recorded_at: DateTime<Utc>,
}
