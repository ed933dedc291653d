//! Report services - Disease reports encoded by hospitals

use super::{ENCODE_HOSPITAL_DATA, READ_HOSPITAL_DATA};
use crate::core::auth::{ensure_hospital_access, hospital_scope, require_role, target_hospital};
use crate::core::{AppError, AppState};
use crate::dtos::{CreateReportDTO, ReportDTO, ReportQuery, UpdateReportDTO};
use crate::entities::{Report, User};
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_macros::debug_handler;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Request body; hospital-bound roles may omit the hospital
#[derive(serde::Deserialize, Debug)]
pub struct CreateReportRequestDTO {
    pub hospital_id: Option<i64>,
    pub disease_id: i64,
    pub report_date: NaiveDate,
    pub confirmed_cases: i64,
    pub deaths: i64,
}

/// Reports cannot describe days that have not happened yet
pub(crate) fn ensure_not_future(report_date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if report_date > today {
        return Err(AppError::bad_request("Report date cannot be in the future")
            .with_details(format!("{} is after {}", report_date, today)));
    }
    Ok(())
}

/// Refuses a second report for the same (hospital, disease, date).
/// `exclude` is the report being edited, if any.
async fn ensure_unique_key(
    state: &AppState,
    hospital_id: i64,
    disease_id: i64,
    report_date: NaiveDate,
    exclude: Option<i64>,
) -> Result<(), AppError> {
    if let Some(existing) = state
        .report
        .find_by_key(&hospital_id, &disease_id, &report_date)
        .await?
    {
        if Some(existing.report_id) != exclude {
            warn!("Duplicate report {} for the same key", existing.report_id);
            return Err(AppError::conflict(
                "A report for this hospital, disease and date already exists",
            ));
        }
    }
    Ok(())
}

async fn load_report(state: &AppState, user: &User, report_id: i64) -> Result<Report, AppError> {
    let report = state
        .report
        .read(&report_id)
        .await?
        .ok_or_else(|| AppError::not_found("Report not found"))?;
    ensure_hospital_access(user, report.hospital_id)?;
    Ok(report)
}

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, disease_id = %body.disease_id, date = %body.report_date))]
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateReportRequestDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating report");
    require_role(&current_user, ENCODE_HOSPITAL_DATA)?;
    let hospital_id = target_hospital(&current_user, body.hospital_id)?;

    let new_report = CreateReportDTO {
        hospital_id,
        disease_id: body.disease_id,
        report_date: body.report_date,
        confirmed_cases: body.confirmed_cases,
        deaths: body.deaths,
        created_by: Some(current_user.user_id),
    };
    new_report.validate()?;
    ensure_not_future(new_report.report_date, Utc::now().date_naive())?;

    if state.hospital.read(&hospital_id).await?.is_none() {
        return Err(AppError::not_found("Hospital not found"));
    }
    if state.disease.read(&new_report.disease_id).await?.is_none() {
        return Err(AppError::not_found("Disease not found"));
    }
    ensure_unique_key(
        &state,
        hospital_id,
        new_report.disease_id,
        new_report.report_date,
        None,
    )
    .await?;

    let report = state.report.create(&new_report).await?;
    info!("Report {} created", report.report_id);
    Ok((StatusCode::CREATED, Json(ReportDTO::from(report))))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<ReportQuery>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<ReportDTO>>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    params.hospital_id = hospital_scope(&current_user, params.hospital_id)?;

    let reports = state.report.list(&params).await?;
    Ok(Json(reports.into_iter().map(ReportDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<ReportDTO>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    let report = load_report(&state, &current_user, report_id).await?;
    Ok(Json(ReportDTO::from(report)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateReportDTO>,
) -> Result<Json<ReportDTO>, AppError> {
    debug!("Updating report");
    require_role(&current_user, ENCODE_HOSPITAL_DATA)?;
    body.validate()?;
    let existing = load_report(&state, &current_user, report_id).await?;

    let disease_id = body.disease_id.unwrap_or(existing.disease_id);
    let report_date = body.report_date.unwrap_or(existing.report_date);
    ensure_not_future(report_date, Utc::now().date_naive())?;

    if disease_id != existing.disease_id && state.disease.read(&disease_id).await?.is_none() {
        return Err(AppError::not_found("Disease not found"));
    }
    ensure_unique_key(
        &state,
        existing.hospital_id,
        disease_id,
        report_date,
        Some(report_id),
    )
    .await?;

    let report = state.report.update(&report_id, &body).await?;
    info!("Report updated");
    Ok(Json(ReportDTO::from(report)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, ENCODE_HOSPITAL_DATA)?;
    load_report(&state, &current_user, report_id).await?;

    state.report.delete(&report_id).await?;
    info!("Report deleted");
    Ok(StatusCode::NO_CONTENT)
}
