//! Equipment services - Medical equipment catalog

use crate::core::auth::require_role;
use crate::core::{AppError, AppState};
use crate::dtos::{CreateEquipmentDTO, EquipmentDTO, UpdateEquipmentDTO};
use crate::entities::{Role, User};
use crate::repositories::{Create, Delete, Update};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EquipmentDTO>>, AppError> {
    let equipment = state.equipment.list().await?;
    Ok(Json(equipment.into_iter().map(EquipmentDTO::from).collect()))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, name = %body.name))]
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateEquipmentDTO>,
) -> Result<impl IntoResponse, AppError> {
    require_role(&current_user, &[Role::SuperUser])?;
    body.validate()?;

    if state.equipment.find_by_name(&body.name).await?.is_some() {
        return Err(AppError::conflict("Equipment with this name already exists"));
    }

    let equipment = state.equipment.create(&body).await?;
    info!("Equipment {} added to catalog", equipment.equipment_id);
    Ok((StatusCode::CREATED, Json(EquipmentDTO::from(equipment))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    Path(equipment_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateEquipmentDTO>,
) -> Result<Json<EquipmentDTO>, AppError> {
    require_role(&current_user, &[Role::SuperUser])?;
    body.validate()?;

    if let Some(name) = body.name.as_deref() {
        if let Some(other) = state.equipment.find_by_name(name).await? {
            if other.equipment_id != equipment_id {
                return Err(AppError::conflict("Equipment with this name already exists"));
            }
        }
    }

    let equipment = state.equipment.update(&equipment_id, &body).await?;
    Ok(Json(EquipmentDTO::from(equipment)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    Path(equipment_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, &[Role::SuperUser])?;

    if !state.equipment.delete(&equipment_id).await? {
        return Err(AppError::not_found("Equipment not found"));
    }
    info!("Equipment removed from catalog");
    Ok(StatusCode::NO_CONTENT)
}
