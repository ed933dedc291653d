//! Asset DTOs

use crate::entities::{Asset, AssetType};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct AssetDTO {
    pub asset_id: i64,
    pub hospital_id: i64,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: i64,
    pub description: Option<String>,
}

impl From<Asset> for AssetDTO {
    fn from(value: Asset) -> Self {
        Self {
            asset_id: value.asset_id,
            hospital_id: value.hospital_id,
            name: value.name,
            asset_type: value.asset_type,
            quantity: value.quantity,
            description: value.description,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateAssetDTO {
    pub hospital_id: i64,

    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    pub asset_type: AssetType,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i64,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateAssetDTO {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,

    pub asset_type: Option<AssetType>,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i64>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
