//! Hospital services

use super::READ_HOSPITAL_DATA;
use crate::core::auth::{ensure_hospital_access, require_role};
use crate::core::{AppError, AppState};
use crate::dtos::{
    CreateHospitalDTO, HospitalDTO, HospitalQuery, HospitalSummaryDTO, UpdateHospitalDTO,
};
use crate::entities::{Role, StaffType, User};
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_hospitals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HospitalQuery>,
) -> Result<Json<Vec<HospitalDTO>>, AppError> {
    let hospitals = state.hospital.list(params.region.as_deref()).await?;
    Ok(Json(hospitals.into_iter().map(HospitalDTO::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_hospital(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<i64>,
) -> Result<Json<HospitalDTO>, AppError> {
    let hospital = state
        .hospital
        .read(&hospital_id)
        .await?
        .ok_or_else(|| AppError::not_found("Hospital not found"))?;
    Ok(Json(HospitalDTO::from(hospital)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, name = %body.name))]
pub async fn create_hospital(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateHospitalDTO>,
) -> Result<impl IntoResponse, AppError> {
    require_role(&current_user, &[Role::SuperUser])?;
    body.validate()?;

    if state.hospital.find_by_name(&body.name).await?.is_some() {
        warn!("Hospital name already in use");
        return Err(AppError::conflict("A hospital with this name already exists"));
    }

    let hospital = state.hospital.create(&body).await?;
    info!("Hospital {} created", hospital.hospital_id);
    Ok((StatusCode::CREATED, Json(HospitalDTO::from(hospital))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_hospital(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateHospitalDTO>,
) -> Result<Json<HospitalDTO>, AppError> {
    require_role(&current_user, &[Role::SuperUser])?;
    body.validate()?;

    if let Some(name) = body.name.as_deref() {
        if let Some(other) = state.hospital.find_by_name(name).await? {
            if other.hospital_id != hospital_id {
                return Err(AppError::conflict("A hospital with this name already exists"));
            }
        }
    }

    let hospital = state.hospital.update(&hospital_id, &body).await?;
    info!("Hospital updated");
    Ok(Json(HospitalDTO::from(hospital)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_hospital(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, &[Role::SuperUser])?;

    if !state.hospital.delete(&hospital_id).await? {
        return Err(AppError::not_found("Hospital not found"));
    }
    info!("Hospital deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Resource overview: assets, staff headcounts and stock health
#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn hospital_summary(
    State(state): State<Arc<AppState>>,
    Path(hospital_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<HospitalSummaryDTO>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    ensure_hospital_access(&current_user, hospital_id)?;

    let hospital = state
        .hospital
        .read(&hospital_id)
        .await?
        .ok_or_else(|| AppError::not_found("Hospital not found"))?;

    debug!("Collecting summary figures");
    let (asset_count, doctors, nurses, inventory) = tokio::try_join!(
        state.asset.total_quantity(&hospital_id),
        state.human_resource.headcount(&hospital_id, StaffType::Doctor),
        state.human_resource.headcount(&hospital_id, StaffType::Nurse),
        state.store.list_items(Some(hospital_id), false),
    )?;

    let low_stock_items = inventory.iter().filter(|item| item.is_low_stock()).count();

    Ok(Json(HospitalSummaryDTO {
        hospital_id: hospital.hospital_id,
        name: hospital.name,
        region: hospital.region,
        asset_count,
        doctors,
        nurses,
        equipment_types: inventory.len(),
        low_stock_items,
    }))
}
