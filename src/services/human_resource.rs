//! Human resource services - Doctor and nurse headcounts

use super::{MANAGE_HOSPITAL_DATA, READ_HOSPITAL_DATA};
use crate::core::auth::{ensure_hospital_access, hospital_scope, require_role, target_hospital};
use crate::core::{AppError, AppState};
use crate::dtos::{
    CreateHumanResourceDTO, HumanResourceDTO, HumanResourceQuery, UpdateHumanResourceDTO,
};
use crate::entities::{HumanResource, StaffType, User};
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(serde::Deserialize, Debug)]
pub struct CreateHumanResourceRequestDTO {
    pub hospital_id: Option<i64>,
    pub staff_type: StaffType,
    pub specialization: Option<String>,
    pub headcount: i64,
}

async fn load_entry(
    state: &AppState,
    user: &User,
    hr_id: i64,
) -> Result<HumanResource, AppError> {
    let entry = state
        .human_resource
        .read(&hr_id)
        .await?
        .ok_or_else(|| AppError::not_found("Human resource entry not found"))?;
    ensure_hospital_access(user, entry.hospital_id)?;
    Ok(entry)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_human_resources(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<HumanResourceQuery>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<HumanResourceDTO>>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    params.hospital_id = hospital_scope(&current_user, params.hospital_id)?;

    let entries = state.human_resource.list(&params).await?;
    Ok(Json(entries.into_iter().map(HumanResourceDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_human_resource(
    State(state): State<Arc<AppState>>,
    Path(hr_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<HumanResourceDTO>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    let entry = load_entry(&state, &current_user, hr_id).await?;
    Ok(Json(HumanResourceDTO::from(entry)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, staff_type = ?body.staff_type))]
pub async fn create_human_resource(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateHumanResourceRequestDTO>,
) -> Result<impl IntoResponse, AppError> {
    require_role(&current_user, MANAGE_HOSPITAL_DATA)?;
    let new_entry = CreateHumanResourceDTO {
        hospital_id: target_hospital(&current_user, body.hospital_id)?,
        staff_type: body.staff_type,
        specialization: body.specialization,
        headcount: body.headcount,
    };
    new_entry.validate()?;

    if state.hospital.read(&new_entry.hospital_id).await?.is_none() {
        return Err(AppError::not_found("Hospital not found"));
    }

    let entry = state.human_resource.create(&new_entry).await?;
    info!("Human resource entry {} created", entry.hr_id);
    Ok((StatusCode::CREATED, Json(HumanResourceDTO::from(entry))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_human_resource(
    State(state): State<Arc<AppState>>,
    Path(hr_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateHumanResourceDTO>,
) -> Result<Json<HumanResourceDTO>, AppError> {
    require_role(&current_user, MANAGE_HOSPITAL_DATA)?;
    body.validate()?;
    load_entry(&state, &current_user, hr_id).await?;

    let entry = state.human_resource.update(&hr_id, &body).await?;
    Ok(Json(HumanResourceDTO::from(entry)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_human_resource(
    State(state): State<Arc<AppState>>,
    Path(hr_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, MANAGE_HOSPITAL_DATA)?;
    load_entry(&state, &current_user, hr_id).await?;

    state.human_resource.delete(&hr_id).await?;
    info!("Human resource entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
