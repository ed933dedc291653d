//! Application State - Shared state of the application
//!
//! Holds every repository, the auth secret and the outbound HTTP collaborators.

use crate::core::Config;
use crate::core::notifier::LowStockNotifier;
use crate::core::prediction::PredictionClient;
use crate::repositories::{
    AssetRepository, DiseaseRepository, EquipmentRepository, HospitalRepository,
    HumanResourceRepository, ReportRepository, StoreRepository, UserRepository,
};
use sqlx::SqlitePool;

/// State shared by every route and middleware
pub struct AppState {
    pub user: UserRepository,
    pub hospital: HospitalRepository,
    pub disease: DiseaseRepository,
    pub report: ReportRepository,
    /// Medical equipment catalog
    pub equipment: EquipmentRepository,
    /// Per-hospital stock of catalog entries
    pub store: StoreRepository,
    pub asset: AssetRepository,
    pub human_resource: HumanResourceRepository,

    /// Secret key for JWT tokens
    pub jwt_secret: String,

    /// Sends low-stock alerts to the mail endpoint
    pub notifier: LowStockNotifier,

    /// Talks to the disease-prediction service
    pub predictor: PredictionClient,
}

impl AppState {
    /// Builds every repository over the shared pool and wires the HTTP
    /// collaborators from the configuration.
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        let http = reqwest::Client::new();
        Self {
            user: UserRepository::new(pool.clone()),
            hospital: HospitalRepository::new(pool.clone()),
            disease: DiseaseRepository::new(pool.clone()),
            report: ReportRepository::new(pool.clone()),
            equipment: EquipmentRepository::new(pool.clone()),
            store: StoreRepository::new(pool.clone()),
            asset: AssetRepository::new(pool.clone()),
            human_resource: HumanResourceRepository::new(pool),
            jwt_secret: config.jwt_secret.clone(),
            notifier: LowStockNotifier::new(
                http.clone(),
                config.mail_endpoint_url.clone(),
                config.app_base_url.clone(),
            ),
            predictor: PredictionClient::new(http, config.prediction_api_url.clone()),
        }
    }
}
