//! Auth services - Sign-up and login

use crate::core::auth::TOKEN_TTL_HOURS;
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{CreateUserDTO, RegisterUserDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Login body (username and password only)
#[derive(serde::Deserialize)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt");
    let user = match state.user.find_by_username(&body.username).await? {
        Some(user) => user,
        None => {
            warn!("Login for unknown user");
            return Err(AppError::unauthorized("Username or password are not correct."));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Wrong password");
        return Err(AppError::unauthorized("Username or password are not correct."));
    }

    let token = encode_jwt(user.username.clone(), user.user_id, &state.jwt_secret)?;

    let cookie_value = format!(
        "token={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        token,
        TOKEN_TTL_HOURS * 60 * 60
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie_value)
            .map_err(|_| AppError::internal_server_error("Failed to build session cookie"))?,
    );
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::internal_server_error("Failed to build authorization header"))?,
    );

    info!("User logged in");
    Ok((StatusCode::OK, headers, Json(UserDTO::from(user))))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterUserDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering new account");
    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        warn!("Username already taken");
        return Err(AppError::conflict("Username already exists"));
    }
    if state.user.find_by_email(&body.email).await?.is_some() {
        warn!("Email already registered");
        return Err(AppError::conflict("Email already registered"));
    }

    let mut new_user = CreateUserDTO::from(body);
    new_user.password = User::hash_password(&new_user.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let created_user = state.user.create(&new_user).await?;

    info!("Account registered with id {}", created_user.user_id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}
