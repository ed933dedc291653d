//! DTOs module - Data Transfer Objects
//!
//! DTOs keep the external (API) representation apart from the internal one (entities).

pub mod asset;
pub mod disease;
pub mod equipment;
pub mod hospital;
pub mod human_resource;
pub mod prediction;
pub mod query;
pub mod report;
pub mod user;

// Re-exports to simplify imports
pub use asset::{AssetDTO, CreateAssetDTO, UpdateAssetDTO};
pub use disease::{CreateDiseaseDTO, DiseaseDTO, UpdateDiseaseDTO};
pub use equipment::{
    CreateEquipmentDTO, CreateStoreDTO, EquipmentDTO, InventoryItemDTO, UpdateEquipmentDTO,
    UpdateStoreDTO,
};
pub use hospital::{CreateHospitalDTO, HospitalDTO, HospitalSummaryDTO, UpdateHospitalDTO};
pub use human_resource::{CreateHumanResourceDTO, HumanResourceDTO, UpdateHumanResourceDTO};
pub use prediction::{PredictionPayload, PredictionRequestDTO, PredictionResponseDTO, StockLevelDTO};
pub use query::{
    AnalyticsQuery, AssetQuery, HospitalQuery, HumanResourceQuery, InventoryQuery, ReportQuery,
    UserQuery,
};
pub use report::{
    CreateReportDTO, DailyTotalsDTO, DiseaseTotalsDTO, ReportAnalyticsDTO, ReportDTO,
    ReportWithDisease, UpdateReportDTO,
};
pub use user::{CreateUserDTO, RegisterUserDTO, UpdateUserDTO, UserDTO};
