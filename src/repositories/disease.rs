//! DiseaseRepository - Disease catalog

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateDiseaseDTO, UpdateDiseaseDTO};
use crate::entities::Disease;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

pub struct DiseaseRepository {
    connection_pool: SqlitePool,
}

impl DiseaseRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Disease>, Error> {
        sqlx::query_as::<_, Disease>(
            "SELECT disease_id, name, description FROM diseases WHERE name = ? COLLATE NOCASE",
        )
        .bind(name)
        .fetch_optional(&self.connection_pool)
        .await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Disease>, Error> {
        sqlx::query_as::<_, Disease>("SELECT disease_id, name, description FROM diseases ORDER BY name")
            .fetch_all(&self.connection_pool)
            .await
    }

    /// True when at least one report references the disease
    #[instrument(skip(self))]
    pub async fn has_reports(&self, disease_id: &i64) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE disease_id = ?")
            .bind(disease_id)
            .fetch_one(&self.connection_pool)
            .await?;
        Ok(count > 0)
    }
}

impl Create<Disease, CreateDiseaseDTO> for DiseaseRepository {
    #[instrument(skip(self, data), fields(name = %data.name))]
    async fn create(&self, data: &CreateDiseaseDTO) -> Result<Disease, Error> {
        debug!("Creating new disease");
        let result = sqlx::query("INSERT INTO diseases (name, description) VALUES (?, ?)")
            .bind(&data.name)
            .bind(&data.description)
            .execute(&self.connection_pool)
            .await?;

        let new_id = result.last_insert_rowid();
        info!("Disease created with id {}", new_id);

        Ok(Disease {
            disease_id: new_id,
            name: data.name.clone(),
            description: data.description.clone(),
        })
    }
}

impl Read<Disease, i64> for DiseaseRepository {
    #[instrument(skip(self), fields(disease_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Disease>, Error> {
        sqlx::query_as::<_, Disease>(
            "SELECT disease_id, name, description FROM diseases WHERE disease_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<Disease, UpdateDiseaseDTO, i64> for DiseaseRepository {
    #[instrument(skip(self, data), fields(disease_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateDiseaseDTO) -> Result<Disease, Error> {
        let result = sqlx::query(
            "UPDATE diseases SET name = COALESCE(?, name), description = COALESCE(?, description) \
             WHERE disease_id = ?",
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

impl Delete<i64> for DiseaseRepository {
    #[instrument(skip(self), fields(disease_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM diseases WHERE disease_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
