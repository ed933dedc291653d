//! Services module - HTTP handlers
//!
//! One sub-module per resource. Every handler runs its authorization check
//! first, validates the input, then talks to the repositories.

pub mod analytics;
pub mod asset;
pub mod auth;
pub mod disease;
pub mod equipment;
pub mod hospital;
pub mod human_resource;
pub mod inventory;
pub mod prediction;
pub mod report;
pub mod user;

// Re-exports to simplify imports
pub use analytics::report_analytics;
pub use asset::{create_asset, delete_asset, get_asset, list_assets, update_asset};
pub use auth::{login_user, register_user};
pub use disease::{create_disease, delete_disease, get_disease, list_diseases, update_disease};
pub use equipment::{create_equipment, delete_equipment, list_equipment, update_equipment};
pub use hospital::{
    create_hospital, delete_hospital, get_hospital, hospital_summary, list_hospitals,
    update_hospital,
};
pub use human_resource::{
    create_human_resource, delete_human_resource, get_human_resource, list_human_resources,
    update_human_resource,
};
pub use inventory::{
    create_inventory_item, delete_inventory_item, get_inventory_item, list_inventory,
    update_inventory_item,
};
pub use prediction::request_prediction;
pub use report::{create_report, delete_report, get_report, list_reports, update_report};
pub use user::{create_user, delete_user, get_me, get_user, list_users, update_user};

use crate::AppState;
use crate::entities::Role;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Roles that may read hospital-owned data (scoped by hospital for bound roles)
pub(crate) const READ_HOSPITAL_DATA: &[Role] = &[
    Role::Government,
    Role::SuperUser,
    Role::HospitalAdmin,
    Role::DataEncoder,
];

/// Roles that may write reports and inventory levels
pub(crate) const ENCODE_HOSPITAL_DATA: &[Role] =
    &[Role::SuperUser, Role::HospitalAdmin, Role::DataEncoder];

/// Roles that may manage assets and human resources
pub(crate) const MANAGE_HOSPITAL_DATA: &[Role] = &[Role::SuperUser, Role::HospitalAdmin];

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "HealthSync is running!")
}
