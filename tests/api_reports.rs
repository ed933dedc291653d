//! Integration tests for disease reports and their analytics

mod common;

#[cfg(test)]
mod report_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::http::HeaderName;
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    fn auth() -> HeaderName {
        HeaderName::from_static("authorization")
    }

    // ============================================================
    // POST /reports
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_encoder_creates_report_for_own_hospital(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let today = Utc::now().date_naive();

        let response = server
            .post("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({
                "disease_id": 3,
                "report_date": today,
                "confirmed_cases": 7,
                "deaths": 0
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let report: Value = response.json();
        assert_eq!(report["hospital_id"], 1);
        assert_eq!(report["created_by"], GENERAL_ENCODER.0);
        assert_eq!(report["report_date"], today.to_string());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_duplicate_report_is_conflict(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({
                "disease_id": 1,
                "report_date": "2024-03-01",
                "confirmed_cases": 3,
                "deaths": 0
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(
            response.json::<Value>()["error"],
            "A report for this hospital, disease and date already exists"
        );

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_future_report_is_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let tomorrow = Utc::now().date_naive() + Duration::days(1);

        let response = server
            .post("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({
                "disease_id": 1,
                "report_date": tomorrow,
                "confirmed_cases": 3,
                "deaths": 0
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "Report date cannot be in the future");

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_negative_counts_are_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({
                "disease_id": 1,
                "report_date": "2024-03-10",
                "confirmed_cases": -1,
                "deaths": 0
            }))
            .await
            .assert_status_bad_request();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_unknown_disease_is_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({
                "disease_id": 42,
                "report_date": "2024-03-10",
                "confirmed_cases": 1,
                "deaths": 0
            }))
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_encoder_cannot_write_other_hospital(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({
                "hospital_id": 2,
                "disease_id": 1,
                "report_date": "2024-03-10",
                "confirmed_cases": 1,
                "deaths": 0
            }))
            .await
            .assert_status_forbidden();

        // nor edit one of its reports
        server
            .patch("/reports/4")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({ "confirmed_cases": 99 }))
            .await
            .assert_status_forbidden();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_super_user_must_name_hospital(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/reports")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({
                "disease_id": 1,
                "report_date": "2024-03-10",
                "confirmed_cases": 1,
                "deaths": 0
            }))
            .await
            .assert_status_bad_request();

        server
            .post("/reports")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({
                "hospital_id": 3,
                "disease_id": 1,
                "report_date": "2024-03-10",
                "confirmed_cases": 1,
                "deaths": 0
            }))
            .await
            .assert_status(StatusCode::CREATED);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_government_cannot_write_reports(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/reports")
            .add_header(auth(), bearer(MINISTRY))
            .json(&json!({
                "hospital_id": 1,
                "disease_id": 1,
                "report_date": "2024-03-10",
                "confirmed_cases": 1,
                "deaths": 0
            }))
            .await
            .assert_status_forbidden();

        Ok(())
    }

    // ============================================================
    // PATCH /reports/{id}
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_update_onto_existing_key_is_conflict(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // report 1 is (hospital 1, Dengue, 2024-03-01); report 2 already holds 2024-03-02
        server
            .patch("/reports/1")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({ "report_date": "2024-03-02" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        // editing counts keeps its own key
        let response = server
            .patch("/reports/1")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({ "confirmed_cases": 12 }))
            .await;
        response.assert_status_ok();
        let report: Value = response.json();
        assert_eq!(report["confirmed_cases"], 12);
        assert_eq!(report["deaths"], 1);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_update_into_future_is_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let tomorrow = Utc::now().date_naive() + Duration::days(1);

        server
            .patch("/reports/1")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&json!({ "report_date": tomorrow }))
            .await
            .assert_status_bad_request();

        Ok(())
    }

    // ============================================================
    // GET /reports, DELETE /reports/{id}
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_listing_is_scoped_for_encoders(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/reports")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .await;
        response.assert_status_ok();
        let reports: Vec<Value> = response.json();
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r["hospital_id"] == 1));
        // newest first
        assert_eq!(reports[0]["report_date"], "2024-03-02");

        let response = server
            .get("/reports")
            .add_header(auth(), bearer(MINISTRY))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 5);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_plain_user_cannot_read_reports(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .get("/reports")
            .add_header(auth(), bearer(CITIZEN))
            .await
            .assert_status_forbidden();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_delete_report(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .delete("/reports/2")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get("/reports/2")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status_not_found();

        Ok(())
    }

    // ============================================================
    // GET /reports/analytics
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_analytics_over_window(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/reports/analytics")
            .add_query_param("start_date", "2024-03-01")
            .add_query_param("end_date", "2024-03-04")
            .add_header(auth(), bearer(MINISTRY))
            .await;
        response.assert_status_ok();

        let analytics: Value = response.json();
        assert_eq!(analytics["total_confirmed"], 55);
        assert_eq!(analytics["total_deaths"], 3);
        assert_eq!(analytics["case_fatality_rate"], 5.45);

        let by_disease = analytics["by_disease"].as_array().expect("array");
        assert_eq!(by_disease.len(), 2);
        assert_eq!(by_disease[0]["disease_name"], "Dengue");
        assert_eq!(by_disease[0]["confirmed_cases"], 45);
        assert_eq!(by_disease[1]["disease_name"], "Malaria");

        let daily = analytics["daily"].as_array().expect("array");
        assert_eq!(daily.len(), 4);
        assert_eq!(daily[3]["date"], "2024-03-04");
        assert_eq!(daily[3]["confirmed_cases"], 0);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_analytics_filters_by_region(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/reports/analytics")
            .add_query_param("start_date", "2024-03-01")
            .add_query_param("end_date", "2024-03-31")
            .add_query_param("region", "South")
            .add_header(auth(), bearer(ROOT))
            .await;
        response.assert_status_ok();

        let analytics: Value = response.json();
        assert_eq!(analytics["total_confirmed"], 5);
        assert_eq!(analytics["total_deaths"], 1);
        assert_eq!(analytics["case_fatality_rate"], 20.0);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_analytics_is_pinned_for_hospital_admins(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/reports/analytics")
            .add_query_param("start_date", "2024-03-01")
            .add_query_param("end_date", "2024-03-31")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["total_confirmed"], 35);

        server
            .get("/reports/analytics")
            .add_query_param("hospital_id", "2")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status_forbidden();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_analytics_rejects_bad_windows(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .get("/reports/analytics")
            .add_query_param("start_date", "2024-03-10")
            .add_query_param("end_date", "2024-03-01")
            .add_header(auth(), bearer(MINISTRY))
            .await
            .assert_status_bad_request();

        server
            .get("/reports/analytics")
            .add_query_param("start_date", "2022-01-01")
            .add_query_param("end_date", "2024-03-01")
            .add_header(auth(), bearer(MINISTRY))
            .await
            .assert_status_bad_request();

        // data encoders do not see analytics
        server
            .get("/reports/analytics")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .await
            .assert_status_forbidden();

        Ok(())
    }
}
