//! Medical equipment entities - Catalog entries and per-hospital stock

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct MedicalEquipment {
    pub equipment_id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Stocked quantity of one equipment type in one hospital
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct MedicalEquipmentStore {
    pub store_id: i64,
    pub hospital_id: i64,
    pub equipment_id: i64,
    pub quantity: i64,
    pub threshold_level: i64,
    pub updated_at: DateTime<Utc>,
}

impl MedicalEquipmentStore {
    /// Stock is low once the quantity falls strictly below the threshold
    pub fn is_below_threshold(&self) -> bool {
        self.quantity < self.threshold_level
    }
}
