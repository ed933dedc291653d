//! HospitalRepository - Hospitals

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateHospitalDTO, UpdateHospitalDTO};
use crate::entities::Hospital;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const HOSPITAL_COLUMNS: &str =
    "hospital_id, name, address, region, contact_number, email, created_at";

pub struct HospitalRepository {
    connection_pool: SqlitePool,
}

impl HospitalRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Hospital>, Error> {
        sqlx::query_as::<_, Hospital>(&format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE name = ?"
        ))
        .bind(name)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Lists hospitals, optionally restricted to one region (case-insensitive)
    #[instrument(skip(self))]
    pub async fn list(&self, region: Option<&str>) -> Result<Vec<Hospital>, Error> {
        debug!("Listing hospitals");
        let hospitals = sqlx::query_as::<_, Hospital>(&format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals \
             WHERE (? IS NULL OR region = ? COLLATE NOCASE) \
             ORDER BY name"
        ))
        .bind(region)
        .bind(region)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} hospitals", hospitals.len());
        Ok(hospitals)
    }
}

impl Create<Hospital, CreateHospitalDTO> for HospitalRepository {
    #[instrument(skip(self, data), fields(name = %data.name))]
    async fn create(&self, data: &CreateHospitalDTO) -> Result<Hospital, Error> {
        debug!("Creating new hospital");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO hospitals (name, address, region, contact_number, email, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.region)
        .bind(&data.contact_number)
        .bind(&data.email)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Hospital created with id {}", new_id);

        Ok(Hospital {
            hospital_id: new_id,
            name: data.name.clone(),
            address: data.address.clone(),
            region: data.region.clone(),
            contact_number: data.contact_number.clone(),
            email: data.email.clone(),
            created_at: now,
        })
    }
}

impl Read<Hospital, i64> for HospitalRepository {
    #[instrument(skip(self), fields(hospital_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Hospital>, Error> {
        sqlx::query_as::<_, Hospital>(&format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE hospital_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<Hospital, UpdateHospitalDTO, i64> for HospitalRepository {
    #[instrument(skip(self, data), fields(hospital_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateHospitalDTO) -> Result<Hospital, Error> {
        debug!("Updating hospital");
        let result = sqlx::query(
            "UPDATE hospitals SET \
                name = COALESCE(?, name), \
                address = COALESCE(?, address), \
                region = COALESCE(?, region), \
                contact_number = COALESCE(?, contact_number), \
                email = COALESCE(?, email) \
             WHERE hospital_id = ?",
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.region)
        .bind(&data.contact_number)
        .bind(&data.email)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for HospitalRepository {
    /// Stores, assets, human resources and reports go with the hospital (ON DELETE CASCADE)
    #[instrument(skip(self), fields(hospital_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        debug!("Deleting hospital");
        let result = sqlx::query("DELETE FROM hospitals WHERE hospital_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
