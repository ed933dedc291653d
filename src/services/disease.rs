//! Disease services

use crate::core::auth::require_role;
use crate::core::{AppError, AppState};
use crate::dtos::{CreateDiseaseDTO, DiseaseDTO, UpdateDiseaseDTO};
use crate::entities::{Role, User};
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

const MANAGE_DISEASES: &[Role] = &[Role::SuperUser, Role::Government];

#[instrument(skip(state))]
pub async fn list_diseases(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DiseaseDTO>>, AppError> {
    let diseases = state.disease.list().await?;
    Ok(Json(diseases.into_iter().map(DiseaseDTO::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_disease(
    State(state): State<Arc<AppState>>,
    Path(disease_id): Path<i64>,
) -> Result<Json<DiseaseDTO>, AppError> {
    let disease = state
        .disease
        .read(&disease_id)
        .await?
        .ok_or_else(|| AppError::not_found("Disease not found"))?;
    Ok(Json(DiseaseDTO::from(disease)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, name = %body.name))]
pub async fn create_disease(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateDiseaseDTO>,
) -> Result<impl IntoResponse, AppError> {
    require_role(&current_user, MANAGE_DISEASES)?;
    body.validate()?;

    if state.disease.find_by_name(&body.name).await?.is_some() {
        return Err(AppError::conflict("A disease with this name already exists"));
    }

    let disease = state.disease.create(&body).await?;
    info!("Disease {} created", disease.disease_id);
    Ok((StatusCode::CREATED, Json(DiseaseDTO::from(disease))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_disease(
    State(state): State<Arc<AppState>>,
    Path(disease_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateDiseaseDTO>,
) -> Result<Json<DiseaseDTO>, AppError> {
    require_role(&current_user, MANAGE_DISEASES)?;
    body.validate()?;

    if let Some(name) = body.name.as_deref() {
        if let Some(other) = state.disease.find_by_name(name).await? {
            if other.disease_id != disease_id {
                return Err(AppError::conflict("A disease with this name already exists"));
            }
        }
    }

    let disease = state.disease.update(&disease_id, &body).await?;
    Ok(Json(DiseaseDTO::from(disease)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_disease(
    State(state): State<Arc<AppState>>,
    Path(disease_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, MANAGE_DISEASES)?;

    if state.disease.has_reports(&disease_id).await? {
        warn!("Disease {} still has reports", disease_id);
        return Err(AppError::conflict("Disease still has reports and cannot be deleted"));
    }
    if !state.disease.delete(&disease_id).await? {
        return Err(AppError::not_found("Disease not found"));
    }
    info!("Disease deleted");
    Ok(StatusCode::NO_CONTENT)
}
