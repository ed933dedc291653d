//! Prediction DTOs - Request/response of the disease-prediction integration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct PredictionRequestDTO {
    #[validate(length(min = 1, max = 100, message = "Region must be between 1 and 100 characters"))]
    pub region: String,
    pub disease_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Current stock of one equipment type summed over a region
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StockLevelDTO {
    pub item: String,
    pub quantity: i64,
}

/// Body forwarded to the prediction service
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PredictionPayload {
    pub disease: String,
    pub region: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub inventory: Vec<StockLevelDTO>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PredictionResponseDTO {
    /// Opaque body returned by the prediction service
    pub prediction: serde_json::Value,
    pub inventory: Vec<StockLevelDTO>,
}
