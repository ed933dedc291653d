//! Report analytics - Date-window aggregation of disease reports

use crate::core::auth::{hospital_scope, require_role};
use crate::core::{AppError, AppState};
use crate::dtos::{
    AnalyticsQuery, DailyTotalsDTO, DiseaseTotalsDTO, ReportAnalyticsDTO, ReportWithDisease,
};
use crate::entities::{Role, User};
use axum::{
    Extension,
    extract::{Json, Query, State},
};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Window used when the caller gives no start date
const DEFAULT_WINDOW_DAYS: i64 = 30;
const MAX_WINDOW_DAYS: i64 = 366;

/// Resolves the inclusive window, defaulting to the 30 days ending `today`
pub(crate) fn resolve_window(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), AppError> {
    let end = end.unwrap_or(today);
    let start = match start {
        Some(start) => start,
        None => end
            .checked_sub_signed(Duration::days(DEFAULT_WINDOW_DAYS - 1))
            .ok_or_else(|| AppError::bad_request("end_date is out of range"))?,
    };
    if start > end {
        return Err(AppError::bad_request("start_date must not be after end_date"));
    }
    if (end - start).num_days() + 1 > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request("Date window cannot exceed 366 days"));
    }
    Ok((start, end))
}

/// Single pass over the rows: totals, per-disease sums and a zero-filled daily series.
/// Rows outside the window are ignored.
pub fn summarize_reports(
    start: NaiveDate,
    end: NaiveDate,
    rows: &[ReportWithDisease],
) -> ReportAnalyticsDTO {
    let mut daily: BTreeMap<NaiveDate, (i64, i64)> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| (day, (0, 0)))
        .collect();
    let mut by_disease: HashMap<i64, DiseaseTotalsDTO> = HashMap::new();
    let (mut total_confirmed, mut total_deaths) = (0i64, 0i64);

    for row in rows {
        let Some(day) = daily.get_mut(&row.report_date) else {
            continue;
        };
        day.0 += row.confirmed_cases;
        day.1 += row.deaths;
        total_confirmed += row.confirmed_cases;
        total_deaths += row.deaths;

        let entry = by_disease
            .entry(row.disease_id)
            .or_insert_with(|| DiseaseTotalsDTO {
                disease_id: row.disease_id,
                disease_name: row.disease_name.clone(),
                confirmed_cases: 0,
                deaths: 0,
            });
        entry.confirmed_cases += row.confirmed_cases;
        entry.deaths += row.deaths;
    }

    let mut by_disease: Vec<DiseaseTotalsDTO> = by_disease.into_values().collect();
    by_disease.sort_by(|a, b| {
        b.confirmed_cases
            .cmp(&a.confirmed_cases)
            .then_with(|| a.disease_name.cmp(&b.disease_name))
    });

    ReportAnalyticsDTO {
        start_date: start,
        end_date: end,
        total_confirmed,
        total_deaths,
        case_fatality_rate: case_fatality_rate(total_confirmed, total_deaths),
        by_disease,
        daily: daily
            .into_iter()
            .map(|(date, (confirmed_cases, deaths))| DailyTotalsDTO {
                date,
                confirmed_cases,
                deaths,
            })
            .collect(),
    }
}

/// Percentage rounded to two decimals; 0 when nothing was confirmed
fn case_fatality_rate(confirmed: i64, deaths: i64) -> f64 {
    if confirmed == 0 {
        return 0.0;
    }
    (deaths as f64 / confirmed as f64 * 10_000.0).round() / 100.0
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn report_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsQuery>,
    Extension(current_user): Extension<User>,
) -> Result<Json<ReportAnalyticsDTO>, AppError> {
    require_role(
        &current_user,
        &[Role::Government, Role::SuperUser, Role::HospitalAdmin],
    )?;
    let hospital_id = hospital_scope(&current_user, params.hospital_id)?;
    let (start, end) = resolve_window(params.start_date, params.end_date, Utc::now().date_naive())?;

    debug!("Aggregating reports from {} to {}", start, end);
    let rows = state
        .report
        .list_in_window(
            &start,
            &end,
            params.disease_id,
            hospital_id,
            params.region.as_deref(),
        )
        .await?;

    Ok(Json(summarize_reports(start, end, &rows)))
}
