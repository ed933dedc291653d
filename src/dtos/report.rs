//! Report DTOs - Disease reports and their analytics

use crate::entities::Report;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct ReportDTO {
    pub report_id: i64,
    pub hospital_id: i64,
    pub disease_id: i64,
    pub report_date: NaiveDate,
    pub confirmed_cases: i64,
    pub deaths: i64,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Report> for ReportDTO {
    fn from(value: Report) -> Self {
        Self {
            report_id: value.report_id,
            hospital_id: value.hospital_id,
            disease_id: value.disease_id,
            report_date: value.report_date,
            confirmed_cases: value.confirmed_cases,
            deaths: value.deaths,
            created_by: value.created_by,
            created_at: value.created_at,
        }
    }
}

/// DTO to persist a new report (hospital already resolved by the service)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateReportDTO {
    pub hospital_id: i64,
    pub disease_id: i64,
    pub report_date: NaiveDate,

    #[validate(range(min = 0, message = "Confirmed cases cannot be negative"))]
    pub confirmed_cases: i64,

    #[validate(range(min = 0, message = "Deaths cannot be negative"))]
    pub deaths: i64,

    pub created_by: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateReportDTO {
    pub disease_id: Option<i64>,
    pub report_date: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Confirmed cases cannot be negative"))]
    pub confirmed_cases: Option<i64>,

    #[validate(range(min = 0, message = "Deaths cannot be negative"))]
    pub deaths: Option<i64>,
}

/// Row used by the analytics aggregation: a report plus its disease name
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct ReportWithDisease {
    pub disease_id: i64,
    pub disease_name: String,
    pub report_date: NaiveDate,
    pub confirmed_cases: i64,
    pub deaths: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DiseaseTotalsDTO {
    pub disease_id: i64,
    pub disease_name: String,
    pub confirmed_cases: i64,
    pub deaths: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyTotalsDTO {
    pub date: NaiveDate,
    pub confirmed_cases: i64,
    pub deaths: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportAnalyticsDTO {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_confirmed: i64,
    pub total_deaths: i64,
    /// deaths / confirmed cases, as a percentage
    pub case_fatality_rate: f64,
    pub by_disease: Vec<DiseaseTotalsDTO>,
    pub daily: Vec<DailyTotalsDTO>,
}
