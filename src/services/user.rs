//! User services - Account management

use crate::core::auth::{hospital_scope, require_role, target_hospital};
use crate::core::{AppError, AppState};
use crate::dtos::{CreateUserDTO, UpdateUserDTO, UserDTO, UserQuery};
use crate::entities::{Role, User};
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

#[instrument(skip(current_user), fields(user_id = %current_user.user_id))]
pub async fn get_me(Extension(current_user): Extension<User>) -> Json<UserDTO> {
    Json(UserDTO::from(current_user))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(mut params): Query<UserQuery>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    require_role(&current_user, &[Role::SuperUser, Role::HospitalAdmin])?;
    params.hospital_id = hospital_scope(&current_user, params.hospital_id)?;

    let users = state.user.list(&params).await?;
    info!("Listed {} users", users.len());
    Ok(Json(users.into_iter().map(UserDTO::from).collect()))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, new_role = ?body.role))]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(mut body): Json<CreateUserDTO>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Creating user account");
    require_role(&current_user, &[Role::SuperUser, Role::HospitalAdmin])?;
    body.validate()?;

    if current_user.role == Role::HospitalAdmin {
        // hospital admins only enrol data encoders of their own hospital
        if body.role != Role::DataEncoder {
            warn!("Hospital admin tried to create a {:?}", body.role);
            return Err(AppError::forbidden("Hospital admins can only create data encoders"));
        }
        body.hospital_id = Some(target_hospital(&current_user, body.hospital_id)?);
    }

    check_hospital_assignment(&state, body.role, body.hospital_id).await?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        return Err(AppError::conflict("Username already exists"));
    }
    if state.user.find_by_email(&body.email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    body.password = User::hash_password(&body.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let created = state.user.create(&body).await?;
    info!("User {} created", created.user_id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created))))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, target = %user_id))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<Json<UserDTO>, AppError> {
    if user_id == current_user.user_id {
        return Ok(Json(UserDTO::from(current_user)));
    }
    require_role(&current_user, &[Role::SuperUser, Role::HospitalAdmin])?;

    let user = state
        .user
        .read(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if current_user.role == Role::HospitalAdmin && user.hospital_id != current_user.hospital_id {
        return Err(AppError::forbidden("You cannot access users of another hospital"));
    }

    Ok(Json(UserDTO::from(user)))
}

/// Super users update anything; everyone else may only touch their own
/// email, full name and password.
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, target = %user_id))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Extension(current_user): Extension<User>,
    Json(mut body): Json<UpdateUserDTO>,
) -> Result<Json<UserDTO>, AppError> {
    debug!("Updating user");
    let is_self = user_id == current_user.user_id;
    if current_user.role != Role::SuperUser {
        if !is_self {
            return Err(AppError::forbidden("Insufficient role"));
        }
        if body.role.is_some() || body.hospital_id.is_some() {
            return Err(AppError::forbidden("You cannot change your own role or hospital"));
        }
    }
    body.validate()?;

    let existing = state
        .user
        .read(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if let Some(email) = body.email.as_deref() {
        if let Some(other) = state.user.find_by_email(email).await? {
            if other.user_id != user_id {
                return Err(AppError::conflict("Email already registered"));
            }
        }
    }

    let role = body.role.unwrap_or(existing.role);
    // moving to a role without a hospital drops the old assignment
    let hospital_id = match body.role {
        Some(new_role) if !new_role.is_hospital_bound() => body.hospital_id,
        _ => body.hospital_id.or(existing.hospital_id),
    };
    check_hospital_assignment(&state, role, hospital_id).await?;

    if let Some(password) = body.password.take() {
        body.password = Some(
            User::hash_password(&password)
                .map_err(|_| AppError::internal_server_error("Failed to hash password"))?,
        );
    }

    let updated = state.user.update(&user_id, &body).await?;
    info!("User updated");
    Ok(Json(UserDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, target = %user_id))]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Extension(current_user): Extension<User>,
) -> Result<StatusCode, AppError> {
    require_role(&current_user, &[Role::SuperUser, Role::HospitalAdmin])?;
    if user_id == current_user.user_id {
        return Err(AppError::conflict("You cannot delete your own account"));
    }

    let target = state
        .user
        .read(&user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    if current_user.role == Role::HospitalAdmin
        && (target.role != Role::DataEncoder || target.hospital_id != current_user.hospital_id)
    {
        warn!("Hospital admin tried to delete user outside their scope");
        return Err(AppError::forbidden("Hospital admins can only remove their own data encoders"));
    }

    state.user.delete(&user_id).await?;
    info!("User deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Hospital-bound roles need an existing hospital
async fn check_hospital_assignment(
    state: &AppState,
    role: Role,
    hospital_id: Option<i64>,
) -> Result<(), AppError> {
    match hospital_id {
        Some(id) => {
            if state.hospital.read(&id).await?.is_none() {
                return Err(AppError::not_found("Hospital not found"));
            }
            Ok(())
        }
        None if role.is_hospital_bound() => Err(AppError::bad_request(
            "Hospital admins and data encoders must be assigned to a hospital",
        )),
        None => Ok(()),
    }
}
