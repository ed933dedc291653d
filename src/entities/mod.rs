//! Entities module - Domain entities
//!
//! Each entity maps one table of the database (see `migrations/`).

pub mod asset;
pub mod disease;
pub mod enums;
pub mod equipment;
pub mod hospital;
pub mod human_resource;
pub mod report;
pub mod user;

// Re-exports to simplify imports
pub use asset::Asset;
pub use disease::Disease;
pub use enums::{AssetType, Role, StaffType};
pub use equipment::{MedicalEquipment, MedicalEquipmentStore};
pub use hospital::Hospital;
pub use human_resource::HumanResource;
pub use report::Report;
pub use user::User;
