//! HumanResourceRepository - Doctor and nurse headcount entries

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateHumanResourceDTO, HumanResourceQuery, UpdateHumanResourceDTO};
use crate::entities::{HumanResource, StaffType};
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const HR_COLUMNS: &str = "hr_id, hospital_id, staff_type, specialization, headcount, recorded_at";

pub struct HumanResourceRepository {
    connection_pool: SqlitePool,
}

impl HumanResourceRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &HumanResourceQuery) -> Result<Vec<HumanResource>, Error> {
        let entries = sqlx::query_as::<_, HumanResource>(&format!(
            "SELECT {HR_COLUMNS} FROM human_resources \
             WHERE (? IS NULL OR hospital_id = ?) AND (? IS NULL OR staff_type = ?) \
             ORDER BY hospital_id, staff_type, hr_id"
        ))
        .bind(filter.hospital_id)
        .bind(filter.hospital_id)
        .bind(filter.staff_type)
        .bind(filter.staff_type)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} human resource entries", entries.len());
        Ok(entries)
    }

    /// Summed headcount of one staff type in a hospital
    #[instrument(skip(self))]
    pub async fn headcount(&self, hospital_id: &i64, staff_type: StaffType) -> Result<i64, Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(headcount), 0) FROM human_resources \
             WHERE hospital_id = ? AND staff_type = ?",
        )
        .bind(hospital_id)
        .bind(staff_type)
        .fetch_one(&self.connection_pool)
        .await
    }
}

impl Create<HumanResource, CreateHumanResourceDTO> for HumanResourceRepository {
    #[instrument(skip(self, data), fields(hospital_id = %data.hospital_id, staff_type = ?data.staff_type))]
    async fn create(&self, data: &CreateHumanResourceDTO) -> Result<HumanResource, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO human_resources (hospital_id, staff_type, specialization, headcount, recorded_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(data.hospital_id)
        .bind(data.staff_type)
        .bind(&data.specialization)
        .bind(data.headcount)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Human resource entry created with id {}", new_id);

        Ok(HumanResource {
            hr_id: new_id,
            hospital_id: data.hospital_id,
            staff_type: data.staff_type,
            specialization: data.specialization.clone(),
            headcount: data.headcount,
            recorded_at: now,
        })
    }
}

impl Read<HumanResource, i64> for HumanResourceRepository {
    #[instrument(skip(self), fields(hr_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<HumanResource>, Error> {
        sqlx::query_as::<_, HumanResource>(&format!(
            "SELECT {HR_COLUMNS} FROM human_resources WHERE hr_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<HumanResource, UpdateHumanResourceDTO, i64> for HumanResourceRepository {
    #[instrument(skip(self, data), fields(hr_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateHumanResourceDTO) -> Result<HumanResource, Error> {
        let result = sqlx::query(
            "UPDATE human_resources SET \
                staff_type = COALESCE(?, staff_type), \
                specialization = COALESCE(?, specialization), \
                headcount = COALESCE(?, headcount), \
                recorded_at = ? \
             WHERE hr_id = ?",
        )
        .bind(data.staff_type)
        .bind(&data.specialization)
        .bind(data.headcount)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for HumanResourceRepository {
    #[instrument(skip(self), fields(hr_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM human_resources WHERE hr_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
