//! HealthSync server library - exposes the main modules for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-exports of the main types
pub use crate::core::{AppError, AppState, Config, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .merge(configure_protected_routes(state.clone()))
        .with_state(state)
}

/// Login and registration, reachable without a token
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Every resource router, all behind the authentication middleware
fn configure_protected_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;

    Router::new()
        .nest("/users", configure_user_routes())
        .nest("/hospitals", configure_hospital_routes())
        .nest("/diseases", configure_disease_routes())
        .nest("/reports", configure_report_routes())
        .nest("/equipment", configure_equipment_routes())
        .nest("/inventory", configure_inventory_routes())
        .nest("/assets", configure_asset_routes())
        .nest("/human-resources", configure_human_resource_routes())
        .nest("/predictions", configure_prediction_routes())
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_user_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(get_me))
        .route(
            "/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

fn configure_hospital_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_hospitals).post(create_hospital))
        .route(
            "/{hospital_id}",
            get(get_hospital).patch(update_hospital).delete(delete_hospital),
        )
        .route("/{hospital_id}/summary", get(hospital_summary))
}

fn configure_disease_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_diseases).post(create_disease))
        .route(
            "/{disease_id}",
            get(get_disease).patch(update_disease).delete(delete_disease),
        )
}

fn configure_report_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/analytics", get(report_analytics))
        .route(
            "/{report_id}",
            get(get_report).patch(update_report).delete(delete_report),
        )
}

fn configure_equipment_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route(
            "/{equipment_id}",
            patch(update_equipment).delete(delete_equipment),
        )
}

fn configure_inventory_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_inventory).post(create_inventory_item))
        .route(
            "/{store_id}",
            get(get_inventory_item)
                .patch(update_inventory_item)
                .delete(delete_inventory_item),
        )
}

fn configure_asset_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_assets).post(create_asset))
        .route(
            "/{asset_id}",
            get(get_asset).patch(update_asset).delete(delete_asset),
        )
}

fn configure_human_resource_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/", get(list_human_resources).post(create_human_resource))
        .route(
            "/{hr_id}",
            get(get_human_resource)
                .patch(update_human_resource)
                .delete(delete_human_resource),
        )
}

fn configure_prediction_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new().route("/", post(request_prediction))
}
