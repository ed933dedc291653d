//! Asset services

use super::{MANAGE_HOSPITAL_DATA, READ_HOSPITAL_DATA};
use crate::core::auth::{ensure_hospital_access, hospital_scope, require_role, target_hospital};
use crate::core::{AppError, AppState};
use crate::dtos::{AssetDTO, AssetQuery, CreateAssetDTO, UpdateAssetDTO};
use crate::entities::{Asset, AssetType, User};
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
pub struct CreateAssetRequestDTO {
    pub hospital_id: Option<i64>,
    pub name: String,
    pub asset_type: AssetType,
    pub quantity: i64,
    pub description: Option<String>,
}

async fn load_asset(state: &AppState, user: &User, asset_id: i64) -> Result<Asset, AppError> {
    let asset = state
        .asset
        .read(&asset_id)
        .await?
        .ok_or_else(|| AppError::not_found("Asset not found"))?;
    ensure_hospital_access(user, asset.hospital_id)?;
    Ok(asset)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<AssetQuery>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<AssetDTO>>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    params.hospital_id = hospital_scope(&current_user, params.hospital_id)?;

    let assets = state.asset.list(&params).await?;
    Ok(Json(assets.into_iter().map(AssetDTO::from).collect()))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_asset(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<AssetDTO>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    let asset = load_asset(&state, &current_user, asset_id).await?;
    Ok(Json(AssetDTO::from(asset)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, asset_type = ?body.asset_type))]
pub async fn create_asset(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateAssetRequestDTO>,
) -> Result<impl IntoResponse, AppError> {
    require_role(&current_user, MANAGE_HOSPITAL_DATA)?;
    let new_asset = CreateAssetDTO {
        hospital_id: target_hospital(&current_user, body.hospital_id)?,
        name: body.name,
        asset_type: body.asset_type,
        quantity: body.quantity,
        description: body.description,
    };
    new_asset.validate()?;

    if state.hospital.read(&new_asset.hospital_id).await?.is_none() {
        return Err(AppError::not_found("Hospital not found"));
    }

    let asset = state.asset.create(&new_asset).await?;
    info!("Asset {} created", asset.asset_id);
    Ok((StatusCode::CREATED, Json(AssetDTO::from(asset))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_asset(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateAssetDTO>,
) -> Result<Json<AssetDTO>, AppError> {
    require_role(&current_user, MANAGE_HOSPITAL_DATA)?;
    body.validate()?;
    load_asset(&state, &current_user, asset_id).await?;

    let asset = state.asset.update(&asset_id, &body).await?;
    Ok(Json(AssetDTO::from(asset)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, MANAGE_HOSPITAL_DATA)?;
    load_asset(&state, &current_user, asset_id).await?;

    state.asset.delete(&asset_id).await?;
    info!("Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}
