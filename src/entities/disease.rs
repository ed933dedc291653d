//! Disease entity

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Disease {
    pub disease_id: i64,
    pub name: String,
    pub description: Option<String>,
}
