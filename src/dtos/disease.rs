//! Disease DTOs

use crate::entities::Disease;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct DiseaseDTO {
    pub disease_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<Disease> for DiseaseDTO {
    fn from(value: Disease) -> Self {
        Self {
            disease_id: value.disease_id,
            name: value.name,
            description: value.description,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateDiseaseDTO {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct UpdateDiseaseDTO {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}
