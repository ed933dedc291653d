//! ReportRepository - Disease reports

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateReportDTO, ReportQuery, ReportWithDisease, UpdateReportDTO};
use crate::entities::Report;
use chrono::{NaiveDate, Utc};
use sqlx::{Error, SqlitePool};
use tracing::{debug, info, instrument};

const REPORT_COLUMNS: &str = "report_id, hospital_id, disease_id, report_date, confirmed_cases, \
                              deaths, created_by, created_at";

pub struct ReportRepository {
    connection_pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// At most one report exists per (hospital, disease, date)
    #[instrument(skip(self))]
    pub async fn find_by_key(
        &self,
        hospital_id: &i64,
        disease_id: &i64,
        report_date: &NaiveDate,
    ) -> Result<Option<Report>, Error> {
        debug!("Looking up report by hospital/disease/date");
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports \
             WHERE hospital_id = ? AND disease_id = ? AND report_date = ?"
        ))
        .bind(hospital_id)
        .bind(disease_id)
        .bind(report_date)
        .fetch_optional(&self.connection_pool)
        .await
    }

    /// Lists reports matching the filter, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &ReportQuery) -> Result<Vec<Report>, Error> {
        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports \
             WHERE (? IS NULL OR hospital_id = ?) \
               AND (? IS NULL OR disease_id = ?) \
               AND (? IS NULL OR report_date >= ?) \
               AND (? IS NULL OR report_date <= ?) \
             ORDER BY report_date DESC, report_id DESC"
        ))
        .bind(filter.hospital_id)
        .bind(filter.hospital_id)
        .bind(filter.disease_id)
        .bind(filter.disease_id)
        .bind(filter.start_date)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.end_date)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Found {} reports", reports.len());
        Ok(reports)
    }

    /// Reports in the inclusive window `[start_date, end_date]`, joined with disease names.
    /// `region` matches the hospital's region.
    #[instrument(skip(self))]
    pub async fn list_in_window(
        &self,
        start_date: &NaiveDate,
        end_date: &NaiveDate,
        disease_id: Option<i64>,
        hospital_id: Option<i64>,
        region: Option<&str>,
    ) -> Result<Vec<ReportWithDisease>, Error> {
        let rows = sqlx::query_as::<_, ReportWithDisease>(
            "SELECT r.disease_id, d.name AS disease_name, r.report_date, r.confirmed_cases, r.deaths \
             FROM reports r \
             INNER JOIN diseases d ON d.disease_id = r.disease_id \
             INNER JOIN hospitals h ON h.hospital_id = r.hospital_id \
             WHERE r.report_date >= ? AND r.report_date <= ? \
               AND (? IS NULL OR r.disease_id = ?) \
               AND (? IS NULL OR r.hospital_id = ?) \
               AND (? IS NULL OR h.region = ? COLLATE NOCASE) \
             ORDER BY r.report_date",
        )
        .bind(start_date)
        .bind(end_date)
        .bind(disease_id)
        .bind(disease_id)
        .bind(hospital_id)
        .bind(hospital_id)
        .bind(region)
        .bind(region)
        .fetch_all(&self.connection_pool)
        .await?;

        debug!("Aggregating {} report rows", rows.len());
        Ok(rows)
    }
}

impl Create<Report, CreateReportDTO> for ReportRepository {
    #[instrument(skip(self, data), fields(hospital_id = %data.hospital_id, disease_id = %data.disease_id))]
    async fn create(&self, data: &CreateReportDTO) -> Result<Report, Error> {
        debug!("Creating new report");
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO reports \
                (hospital_id, disease_id, report_date, confirmed_cases, deaths, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.hospital_id)
        .bind(data.disease_id)
        .bind(data.report_date)
        .bind(data.confirmed_cases)
        .bind(data.deaths)
        .bind(data.created_by)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Report created with id {}", new_id);

        Ok(Report {
            report_id: new_id,
            hospital_id: data.hospital_id,
            disease_id: data.disease_id,
            report_date: data.report_date,
            confirmed_cases: data.confirmed_cases,
            deaths: data.deaths,
            created_by: data.created_by,
            created_at: now,
        })
    }
}

impl Read<Report, i64> for ReportRepository {
    #[instrument(skip(self), fields(report_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Report>, Error> {
        sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE report_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
    }
}

impl Update<Report, UpdateReportDTO, i64> for ReportRepository {
    #[instrument(skip(self, data), fields(report_id = %id))]
    async fn update(&self, id: &i64, data: &UpdateReportDTO) -> Result<Report, Error> {
        debug!("Updating report");
        let result = sqlx::query(
            "UPDATE reports SET \
                disease_id = COALESCE(?, disease_id), \
                report_date = COALESCE(?, report_date), \
                confirmed_cases = COALESCE(?, confirmed_cases), \
                deaths = COALESCE(?, deaths) \
             WHERE report_id = ?",
        )
        .bind(data.disease_id)
        .bind(data.report_date)
        .bind(data.confirmed_cases)
        .bind(data.deaths)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RowNotFound);
        }

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for ReportRepository {
    #[instrument(skip(self), fields(report_id = %id))]
    async fn delete(&self, id: &i64) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM reports WHERE report_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
