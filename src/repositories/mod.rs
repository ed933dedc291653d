//! Repositories module - One repository per table
//!
//! Every repository owns a clone of the shared `SqlitePool` and implements the
//! generic CRUD traits plus its own finders.
//!
//! Queries use the runtime API (`sqlx::query` / `sqlx::query_as`) with entities
//! deriving `FromRow`, so the crate builds without a live database.
//! Pick the fetch method by the number of rows expected:
//!   `.execute`        INSERT/UPDATE/DELETE
//!   `.fetch_optional` zero or one row
//!   `.fetch_one`      exactly one row (aggregates)
//!   `.fetch_all`      many rows
//! Optional filters are written as `(? IS NULL OR column = ?)` and the value is bound twice.

pub mod asset;
pub mod disease;
pub mod equipment;
pub mod hospital;
pub mod human_resource;
pub mod report;
pub mod store;
pub mod traits;
pub mod user;

// Re-export the traits to simplify imports
pub use traits::{Create, Delete, Read, Update};

pub use asset::AssetRepository;
pub use disease::DiseaseRepository;
pub use equipment::EquipmentRepository;
pub use hospital::HospitalRepository;
pub use human_resource::HumanResourceRepository;
pub use report::ReportRepository;
pub use store::StoreRepository;
pub use user::UserRepository;
