//! Asset entity - Generic hospital resource

use super::enums::AssetType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Asset {
    pub asset_id: i64,
    pub hospital_id: i64,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: i64,
    pub description: Option<String>,
}
