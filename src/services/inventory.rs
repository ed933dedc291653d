//! Inventory services - Stock levels per hospital and low-stock alerts

use super::{ENCODE_HOSPITAL_DATA, READ_HOSPITAL_DATA};
use crate::core::auth::{ensure_hospital_access, hospital_scope, require_role, target_hospital};
use crate::core::{AppError, AppState};
use crate::dtos::{CreateStoreDTO, InventoryItemDTO, InventoryQuery, UpdateStoreDTO};
use crate::entities::User;
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Request body; hospital-bound roles may omit the hospital
#[derive(serde::Deserialize, Debug)]
pub struct CreateStoreRequestDTO {
    pub hospital_id: Option<i64>,
    pub equipment_id: i64,
    pub quantity: i64,
    pub threshold_level: i64,
}

async fn load_item(
    state: &AppState,
    user: &User,
    store_id: i64,
) -> Result<InventoryItemDTO, AppError> {
    let item = state
        .store
        .read_item(&store_id)
        .await?
        .ok_or_else(|| AppError::not_found("Inventory item not found"))?;
    ensure_hospital_access(user, item.hospital_id)?;
    Ok(item)
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InventoryQuery>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<InventoryItemDTO>>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    let hospital_id = hospital_scope(&current_user, params.hospital_id)?;

    let items = state.store.list_items(hospital_id, params.low_stock).await?;
    Ok(Json(items))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(store_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<InventoryItemDTO>, AppError> {
    require_role(&current_user, READ_HOSPITAL_DATA)?;
    Ok(Json(load_item(&state, &current_user, store_id).await?))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, equipment_id = %body.equipment_id))]
pub async fn create_inventory_item(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateStoreRequestDTO>,
) -> Result<impl IntoResponse, AppError> {
    require_role(&current_user, ENCODE_HOSPITAL_DATA)?;
    let new_store = CreateStoreDTO {
        hospital_id: target_hospital(&current_user, body.hospital_id)?,
        equipment_id: body.equipment_id,
        quantity: body.quantity,
        threshold_level: body.threshold_level,
    };
    new_store.validate()?;

    if state.hospital.read(&new_store.hospital_id).await?.is_none() {
        return Err(AppError::not_found("Hospital not found"));
    }
    if state.equipment.read(&new_store.equipment_id).await?.is_none() {
        return Err(AppError::not_found("Equipment not found"));
    }
    if state
        .store
        .find_by_pair(&new_store.hospital_id, &new_store.equipment_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("This equipment is already stocked by the hospital"));
    }

    let store = state.store.create(&new_store).await?;
    info!("Store row {} created", store.store_id);
    let item = load_item(&state, &current_user, store.store_id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Updates quantity/threshold, then alerts if the stock ended up below its threshold.
/// The alert is dispatched in the background and never affects the response.
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(store_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateStoreDTO>,
) -> Result<Json<InventoryItemDTO>, AppError> {
    require_role(&current_user, ENCODE_HOSPITAL_DATA)?;
    body.validate()?;
    load_item(&state, &current_user, store_id).await?;

    let store = state.store.update(&store_id, &body).await?;
    let item = load_item(&state, &current_user, store.store_id).await?;

    if store.is_below_threshold() {
        debug!(
            "Stock {} below threshold {}, notifying",
            store.quantity, store.threshold_level
        );
        let alert = state.notifier.build_alert(&item, &current_user);
        state.notifier.notify(alert);
    }

    info!("Inventory item updated");
    Ok(Json(item))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_inventory_item(
    State(state): State<Arc<AppState>>,
    Path(store_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, ENCODE_HOSPITAL_DATA)?;
    load_item(&state, &current_user, store_id).await?;

    state.store.delete(&store_id).await?;
    info!("Inventory item deleted");
    Ok(StatusCode::NO_CONTENT)
}
