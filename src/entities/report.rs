//! Report entity - Daily case/death counts of a disease in a hospital

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Report {
    pub report_id: i64,
    pub hospital_id: i64,
    pub disease_id: i64,
    // unique together with hospital_id and disease_id
    pub report_date: NaiveDate,
    pub confirmed_cases: i64,
    pub deaths: i64,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}
