//! Medical equipment DTOs - Catalog and inventory

use crate::entities::MedicalEquipment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct EquipmentDTO {
    pub equipment_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<MedicalEquipment> for EquipmentDTO {
    fn from(value: MedicalEquipment) -> Self {
        Self {
            equipment_id: value.equipment_id,
            name: value.name,
            description: value.description,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateEquipmentDTO {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateEquipmentDTO {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Inventory row joined with the equipment name
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct InventoryItemDTO {
    pub store_id: i64,
    pub hospital_id: i64,
    pub equipment_id: i64,
    pub equipment_name: String,
    pub quantity: i64,
    pub threshold_level: i64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItemDTO {
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.threshold_level
    }
}

/// DTO to persist a store row (hospital already resolved by the service)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateStoreDTO {
    pub hospital_id: i64,
    pub equipment_id: i64,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i64,

    #[validate(range(min = 0, message = "Threshold level cannot be negative"))]
    pub threshold_level: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateStoreDTO {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i64>,

    #[validate(range(min = 0, message = "Threshold level cannot be negative"))]
    pub threshold_level: Option<i64>,
}
