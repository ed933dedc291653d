use crate::core::{AppError, AppState};
use crate::entities::{Role, User};
use crate::repositories::Read;
use axum::extract::State;
use axum::{Error, body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Lifetime of issued tokens (and of the login cookie)
pub const TOKEN_TTL_HOURS: i64 = 24;

// content of the jwt token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub id: i64,
    pub username: String,
}

#[instrument(skip(secret), fields(username = %username, id = %id))]
pub fn encode_jwt(username: String, id: i64, secret: &str) -> Result<String, Error> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let expire: chrono::TimeDelta = Duration::hours(TOKEN_TTL_HOURS);
    let exp: usize = (now + expire).timestamp() as usize;
    let iat: usize = now.timestamp() as usize;
    let claim = Claims {
        iat,
        exp,
        username,
        id,
    };

    encode(
        &Header::default(),
        &claim,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map(|token| {
        info!("JWT token encoded successfully");
        token
    })
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        Error::new("Error in encoding jwt token")
    })
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, Error> {
    debug!("Decoding JWT token");
    decode::<Claims>(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| {
        debug!("JWT token decoded successfully for user: {}", data.claims.username);
        data
    })
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        Error::new("Error in decoding jwt token")
    })
}

/// Pulls the token out of `Authorization: Bearer <token>`, falling back to the `token` cookie
fn extract_token(req: &Request) -> Option<String> {
    if let Some(header) = req.headers().get(http::header::AUTHORIZATION) {
        let value = header.to_str().ok()?;
        let mut parts = value.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
                Some(token.to_string())
            }
            _ => None,
        };
    }

    req.headers()
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, token) = pair.trim().split_once('=')?;
            (name == "token" && !token.is_empty()).then(|| token.to_string())
        })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let token = extract_token(&req).ok_or_else(|| {
        warn!("Missing or malformed credentials");
        AppError::forbidden("Please add the JWT token to the header")
    })?;

    let token_data = decode_jwt(&token, &state.jwt_secret)
        .map_err(|_| AppError::unauthorized("Unable to decode token"))?;

    // reload the user so role changes apply immediately
    let current_user = match state.user.read(&token_data.claims.id).await? {
        Some(user) if user.username == token_data.claims.username => {
            debug!("User authenticated: {}", user.username);
            user
        }
        _ => {
            warn!("User not found in database: {}", token_data.claims.username);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Verifies that the user holds one of the allowed roles
#[instrument(skip(user), fields(user_id = %user.user_id, role = ?user.role))]
pub fn require_role(user: &User, allowed_roles: &[Role]) -> Result<(), AppError> {
    if !allowed_roles.contains(&user.role) {
        warn!(
            "User {} has insufficient role {:?}, required one of: {:?}",
            user.user_id, user.role, allowed_roles
        );
        return Err(AppError::forbidden("Insufficient role").with_details(format!(
            "This action requires one of the following roles: {:?}",
            allowed_roles
        )));
    }
    Ok(())
}

/// Resolves the hospital filter a user may apply to a listing.
///
/// Government and super users pass `requested` through (`None` = every hospital).
/// Hospital-bound roles always get their own hospital and are refused any other one.
pub fn hospital_scope(user: &User, requested: Option<i64>) -> Result<Option<i64>, AppError> {
    if user.role.has_global_view() {
        return Ok(requested);
    }
    if !user.role.is_hospital_bound() {
        return Err(AppError::forbidden("Insufficient role"));
    }
    let own = user
        .hospital_id
        .ok_or_else(|| AppError::forbidden("No hospital assigned to this account"))?;
    match requested {
        Some(other) if other != own => {
            warn!("User {} asked for hospital {} outside their scope", user.user_id, other);
            Err(AppError::forbidden("You cannot access another hospital"))
        }
        _ => Ok(Some(own)),
    }
}

/// Resolves the hospital a new record is written to.
/// Hospital-bound roles default to their own; global roles must name one.
pub fn target_hospital(user: &User, requested: Option<i64>) -> Result<i64, AppError> {
    hospital_scope(user, requested)?
        .ok_or_else(|| AppError::bad_request("hospital_id is required"))
}

/// Checks that an existing record belonging to `hospital_id` is within the user's scope
pub fn ensure_hospital_access(user: &User, hospital_id: i64) -> Result<(), AppError> {
    hospital_scope(user, Some(hospital_id)).map(|_| ())
}
