//! Hospital entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Hospital {
    pub hospital_id: i64,
    pub name: String,
    pub address: String,
    pub region: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}
