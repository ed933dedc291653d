//! Hospital DTOs

use crate::entities::Hospital;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct HospitalDTO {
    pub hospital_id: i64,
    pub name: String,
    pub address: String,
    pub region: String,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Hospital> for HospitalDTO {
    fn from(value: Hospital) -> Self {
        Self {
            hospital_id: value.hospital_id,
            name: value.name,
            address: value.address,
            region: value.region,
            contact_number: value.contact_number,
            email: value.email,
            created_at: value.created_at,
        }
    }
}

/// DTO to create a new hospital (without hospital_id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateHospitalDTO {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 300, message = "Address must be between 1 and 300 characters"))]
    pub address: String,

    #[validate(length(min = 1, max = 100, message = "Region must be between 1 and 100 characters"))]
    pub region: String,

    #[validate(length(max = 40))]
    pub contact_number: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateHospitalDTO {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 300, message = "Address must be between 1 and 300 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Region must be between 1 and 100 characters"))]
    pub region: Option<String>,

    #[validate(length(max = 40))]
    pub contact_number: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

/// Resource overview of one hospital
#[derive(Serialize, Deserialize, Debug)]
pub struct HospitalSummaryDTO {
    pub hospital_id: i64,
    pub name: String,
    pub region: String,
    pub asset_count: i64,
    pub doctors: i64,
    pub nurses: i64,
    pub equipment_types: usize,
    pub low_stock_items: usize,
}
