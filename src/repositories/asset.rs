//! AssetRepository - Generic hospital assets

use super::{Create, Delete, Read, Update};
use crate::dtos::{AssetQuery, CreateAssetDTO, UpdateAssetDTO};
use crate::entities::Asset;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const ASSET_COLUMNS: &str = "asset_id, hospital_id, name, asset_type, quantity, description";

pub struct AssetRepository {
    connection_pool: SqlitePool,
}

impl AssetRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: &AssetQuery) -> Result<Vec<Asset>, Error> {
        let assets = sqlx::query_as::<_, Asset>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE (? IS NULL OR hospital_id = ?) AND (? IS NULL OR asset_type = ?) \
             ORDER BY hospital_id, name"
        ))
        .bind(filter.hospital_id)
        .bind(filter.hospital_id)
        .bind(filter.asset_type)
        .bind(filter.asset_type)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} assets", assets.len());
        Ok(assets)
    }

    /// Total number of asset units held by a hospital
    #[instrument(skip(self))]
    pub async fn total_quantity(&self, hospital_id: &i64) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM assets WHERE hospital_id = ?")
            .bind(hospital_id)
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<Asset, CreateAssetDTO> for AssetRepository {
    #[instrument(skip(self, data), fields(hospital_id = %data.hospital_id, asset_type = ?data.asset_type))]
    async fn create(&self, data: &CreateAssetDTO) -> Result<Asset, Error> {
        let result = sqlx::query(
            "INSERT INTO assets (hospital_id, name, asset_type, quantity, description) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(data.hospital_id)
        .bind(&data.name)
        .bind(data.asset_type)
        .bind(data.quantity)
        .bind(&data.description)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Asset created with id {}", new_id);

        Ok(Asset {
            asset_id: new_id,
            hospital_id: data.hospital_id,
            name: data.name.clone(),
            asset_type: data.asset_type,
            quantity: data.quantity,
            description: data.description.clone(),
        })
    }
}

impl Read<Asset, i64> for AssetRepository {
    #[instrument(skip(self), fields(asset_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Asset>, Error> {
        sqlx::query_as::<_, Asset>(&format!("SELECT {ASSET_COLUMNS} FROM assets WHERE asset_id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }
}

impl Update<Asset, UpdateAssetDTO, i64> for AssetRepository {
    #[instrument(skip(self, data), fields(asset_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateAssetDTO) -> Result<Asset, Error> {
        let result = sqlx::query(
            "UPDATE assets SET \
                name = COALESCE(?, name), \
                asset_type = COALESCE(?, asset_type), \
                quantity = COALESCE(?, quantity), \
                description = COALESCE(?, description) \
             WHERE asset_id = ?",
        )
        .bind(&data.name)
        .bind(data.asset_type)
        .bind(data.quantity)
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

impl Delete<i64> for AssetRepository {
    #[instrument(skip(self), fields(asset_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM assets WHERE asset_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
