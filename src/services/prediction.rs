//! Prediction services - Disease forecasts from regional stock levels

use crate::core::auth::require_role;
use crate::core::{AppError, AppState};
use crate::dtos::{PredictionPayload, PredictionRequestDTO, PredictionResponseDTO};
use crate::entities::{Role, User};
use crate::repositories::Read;
use axum::{
    Extension,
    extract::{Json, State},
};
use axum_macros::debug_handler;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, region = %body.region))]
pub async fn request_prediction(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<PredictionRequestDTO>,
) -> Result<Json<PredictionResponseDTO>, AppError> {
    require_role(&current_user, &[Role::Government, Role::SuperUser])?;
    body.validate()?;
    if body.start_date > body.end_date {
        return Err(AppError::bad_request("start_date must not be after end_date"));
    }

    let disease = state
        .disease
        .read(&body.disease_id)
        .await?
        .ok_or_else(|| AppError::not_found("Disease not found"))?;

    if state.hospital.list(Some(body.region.as_str())).await?.is_empty() {
        warn!("No hospitals registered in region");
        return Err(AppError::not_found("No hospitals found in this region"));
    }

    let inventory = state.store.stock_by_region(&body.region).await?;
    debug!("Region holds {} equipment types", inventory.len());

    let payload = PredictionPayload {
        disease: disease.name,
        region: body.region,
        start_date: body.start_date,
        end_date: body.end_date,
        inventory,
    };
    let prediction = state.predictor.predict(&payload).await?;

    info!("Prediction served");
    Ok(Json(PredictionResponseDTO {
        prediction,
        inventory: payload.inventory,
    }))
}
