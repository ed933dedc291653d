//! StoreRepository - Stocked equipment per hospital (MedicalEquipmentStore)

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateStoreDTO, InventoryItemDTO, StockLevelDTO, UpdateStoreDTO};
use crate::entities::MedicalEquipmentStore;
use chrono::Utc;
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const STORE_COLUMNS: &str =
    "store_id, hospital_id, equipment_id, quantity, threshold_level, updated_at";

const ITEM_SELECT: &str = "SELECT s.store_id, s.hospital_id, s.equipment_id, \
                           e.name AS equipment_name, s.quantity, s.threshold_level, s.updated_at \
                           FROM medical_equipment_stores s \
                           INNER JOIN medical_equipment e ON e.equipment_id = s.equipment_id";

pub struct StoreRepository {
    connection_pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// One store row exists per (hospital, equipment)
    #[instrument(skip(self))]
    pub async fn find_by_pair(
        &self,
        hospital_id: &i64,
        equipment_id: &i64,
    ) -> Result<Option<MedicalEquipmentStore>, Error> {
        sqlx::query_as::<_, MedicalEquipmentStore>(&format!(
            "SELECT {STORE_COLUMNS} FROM medical_equipment_stores \
             WHERE hospital_id = ? AND equipment_id = ?"
        ))
        .bind(hospital_id)
        .bind(equipment_id)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Store row joined with the equipment name
    #[instrument(skip(self), fields(store_id = %id))]
    pub async fn read_item(&self, id: &i64) -> Result<Option<InventoryItemDTO>, Error> {
        sqlx::query_as::<_, InventoryItemDTO>(&format!("{ITEM_SELECT} WHERE s.store_id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await
    }

    /// Inventory listing; `low_stock` keeps rows strictly below their threshold
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        hospital_id: Option<i64>,
        low_stock: bool,
    ) -> Result<Vec<InventoryItemDTO>, Error> {
        let items = sqlx::query_as::<_, InventoryItemDTO>(&format!(
            "{ITEM_SELECT} \
             WHERE (? IS NULL OR s.hospital_id = ?) \
               AND (? = 0 OR s.quantity < s.threshold_level) \
             ORDER BY s.hospital_id, e.name"
        ))
        .bind(hospital_id)
        .bind(hospital_id)
        .bind(low_stock)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} inventory rows", items.len());
        Ok(items)
    }

    /// Current stock per equipment name summed over every hospital of a region
    #[instrument(skip(self))]
    pub async fn stock_by_region(&self, region: &str) -> Result<Vec<StockLevelDTO>, Error> {
        let levels = sqlx::query_as::<_, StockLevelDTO>(
            "SELECT e.name AS item, COALESCE(SUM(s.quantity), 0) AS quantity \
             FROM medical_equipment_stores s \
             INNER JOIN medical_equipment e ON e.equipment_id = s.equipment_id \
             INNER JOIN hospitals h ON h.hospital_id = s.hospital_id \
             WHERE h.region = ? COLLATE NOCASE \
             GROUP BY e.equipment_id, e.name \
             ORDER BY e.name",
        )
        .bind(region)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Aggregated {} equipment types for region", levels.len());
        Ok(levels)
    }
}

impl Create<MedicalEquipmentStore, CreateStoreDTO> for StoreRepository {
    #[instrument(skip(self, data), fields(hospital_id = %data.hospital_id, equipment_id = %data.equipment_id))]
    async fn create(&self, data: &CreateStoreDTO) -> Result<MedicalEquipmentStore, Error> {
        debug!("Stocking equipment");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO medical_equipment_stores \
                (hospital_id, equipment_id, quantity, threshold_level, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(data.hospital_id)
        .bind(data.equipment_id)
        .bind(data.quantity)
        .bind(data.threshold_level)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Store row created with id {}", new_id);

        Ok(MedicalEquipmentStore {
            store_id: new_id,
            hospital_id: data.hospital_id,
            equipment_id: data.equipment_id,
            quantity: data.quantity,
            threshold_level: data.threshold_level,
            updated_at: now,
        })
    }
}

impl Read<MedicalEquipmentStore, i64> for StoreRepository {
    #[instrument(skip(self), fields(store_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<MedicalEquipmentStore>, Error> {
        sqlx::query_as::<_, MedicalEquipmentStore>(&format!(
            "SELECT {STORE_COLUMNS} FROM medical_equipment_stores WHERE store_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<MedicalEquipmentStore, UpdateStoreDTO, i64> for StoreRepository {
    #[instrument(skip(self, data), fields(store_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateStoreDTO) -> Result<MedicalEquipmentStore, Error> {
        debug!("Updating stock level");
        let result = sqlx::query(
            "UPDATE medical_equipment_stores SET \
                quantity = COALESCE(?, quantity), \
                threshold_level = COALESCE(?, threshold_level), \
                updated_at = ? \
             WHERE store_id = ?",
        )
        .bind(data.quantity)
        .bind(data.threshold_level)
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

impl Delete<i64> for StoreRepository {
    #[instrument(skip(self), fields(store_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM medical_equipment_stores WHERE store_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
