//! User DTOs - Data Transfer Objects for accounts

use crate::entities::{Role, User};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

lazy_static! {
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").unwrap();
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("Username must be 3-32 letters, digits, '.', '-' or '_'".into()))
    }
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password")
            .with_message("Password must contain at least one letter and one digit".into()))
    }
}

// password is never part of this struct, so it cannot leak to the client
#[derive(Serialize, Deserialize, Debug)]
pub struct UserDTO {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub hospital_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            user_id: value.user_id,
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            role: value.role,
            hospital_id: value.hospital_id,
            created_at: value.created_at,
        }
    }
}

/// Self sign-up body; the account starts with the USER role
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RegisterUserDTO {
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 120, message = "Full name must be between 1 and 120 characters"))]
    pub full_name: String,

    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,
}

/// DTO to create a new user (password is hashed by the service before reaching the repository)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 120, message = "Full name must be between 1 and 120 characters"))]
    pub full_name: String,

    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: String,

    pub role: Role,
    pub hospital_id: Option<i64>,
}

impl From<RegisterUserDTO> for CreateUserDTO {
    fn from(value: RegisterUserDTO) -> Self {
        Self {
            username: value.username,
            email: value.email,
            full_name: value.full_name,
            password: value.password,
            role: Role::User,
            hospital_id: None,
        }
    }
}

/// DTO to update a user (only `Some` fields are modified)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateUserDTO {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 120, message = "Full name must be between 1 and 120 characters"))]
    pub full_name: Option<String>,

    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"),
        custom(function = "validate_password_strength")
    )]
    pub password: Option<String>,

    pub role: Option<Role>,
    pub hospital_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str) -> RegisterUserDTO {
        RegisterUserDTO {
            username: username.to_string(),
            email: "someone@example.org".to_string(),
            full_name: "Some One".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_sign_up() {
        assert!(register("maria.santos", "Secret123").validate().is_ok());
    }

    #[test]
    fn rejects_bad_usernames() {
        assert!(register("ab", "Secret123").validate().is_err());
        assert!(register("has space", "Secret123").validate().is_err());
    }

    #[test]
    fn rejects_weak_passwords() {
        assert!(register("maria", "short1").validate().is_err());
        assert!(register("maria", "onlyletters").validate().is_err());
        assert!(register("maria", "1234567890").validate().is_err());
    }

    #[test]
    fn password_is_never_serialized() {
        let dto = UserDTO {
            user_id: 1,
            username: "maria".into(),
            email: "maria@example.org".into(),
            full_name: "Maria".into(),
            role: Role::DataEncoder,
            hospital_id: Some(2),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "DATA_ENCODER");
    }
}
