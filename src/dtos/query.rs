//! Query DTOs - Query-string filters of the list endpoints

use crate::entities::{AssetType, Role, StaffType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct UserQuery {
    pub role: Option<Role>,
    pub hospital_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct HospitalQuery {
    pub region: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct ReportQuery {
    pub hospital_id: Option<i64>,
    pub disease_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct AnalyticsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub disease_id: Option<i64>,
    pub hospital_id: Option<i64>,
    pub region: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InventoryQuery {
    pub hospital_id: Option<i64>,
    #[serde(default)]
    pub low_stock: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AssetQuery {
    pub hospital_id: Option<i64>,
    pub asset_type: Option<AssetType>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct HumanResourceQuery {
    pub hospital_id: Option<i64>,
    pub staff_type: Option<StaffType>,
}
