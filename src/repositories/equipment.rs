//! EquipmentRepository - Medical equipment catalog

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateEquipmentDTO, UpdateEquipmentDTO};
use crate::entities::MedicalEquipment;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

pub struct EquipmentRepository {
    connection_pool: SqlitePool,
}

impl EquipmentRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<MedicalEquipment>, Error> {
        sqlx::query_as::<_, MedicalEquipment>(
            "SELECT equipment_id, name, description FROM medical_equipment \
             WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(&self.connection_pool)
        .await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MedicalEquipment>, Error> {
        sqlx::query_as::<_, MedicalEquipment>(
            "SELECT equipment_id, name, description FROM medical_equipment ORDER BY name",
        )
        .fetch_all(&self.connection_pool)
        .await
    }
}

impl Create<MedicalEquipment, CreateEquipmentDTO> for EquipmentRepository {
    #[instrument(skip(self, data), fields(name = %data.name))]
    async fn create(&self, data: &CreateEquipmentDTO) -> Result<MedicalEquipment, Error> {
        debug!("Creating catalog entry");
        let result = sqlx::query("INSERT INTO medical_equipment (name, description) VALUES (?, ?)")
            .bind(&data.name)
            .bind(&data.description)
            .execute(&self.connection_pool)
            .await?;

        let new_id = result.last_insert_rowid();
        info!("Equipment created with id {}", new_id);

        Ok(MedicalEquipment {
            equipment_id: new_id,
            name: data.name.clone(),
            description: data.description.clone(),
        })
    }
}

impl Read<MedicalEquipment, i64> for EquipmentRepository {
    #[instrument(skip(self), fields(equipment_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<MedicalEquipment>, Error> {
        sqlx::query_as::<_, MedicalEquipment>(
            "SELECT equipment_id, name, description FROM medical_equipment WHERE equipment_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<MedicalEquipment, UpdateEquipmentDTO, i64> for EquipmentRepository {
    #[instrument(skip(self, data), fields(equipment_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateEquipmentDTO) -> Result<MedicalEquipment, Error> {
        let result = sqlx::query(
            "UPDATE medical_equipment SET \
                name = COALESCE(?, name), description = COALESCE(?, description) \
             WHERE equipment_id = ?",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for EquipmentRepository {
    #[instrument(skip(self), fields(equipment_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM medical_equipment WHERE equipment_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
