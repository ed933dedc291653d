//! Core Module - Infrastructure components of the application
//!
//! - Authentication, JWT and role/hospital scoping
//! - Configuration
//! - Error handling
//! - Application state
//! - Outbound collaborators (mail notifier, prediction service)

pub mod auth;
pub mod config;
pub mod error;
pub mod notifier;
pub mod prediction;
pub mod state;

// Re-exports to simplify imports
pub use auth::{Claims, authentication_middleware, decode_jwt, encode_jwt};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
