//! Integration tests for hospitals, their resources and the shared catalogs

mod common;

#[cfg(test)]
mod hospital_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::http::HeaderName;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    fn auth() -> HeaderName {
        HeaderName::from_static("authorization")
    }

    // ============================================================
    // /hospitals
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_list_hospitals_by_region(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/hospitals")
            .add_query_param("region", "north")
            .add_header(auth(), bearer(CITIZEN))
            .await;
        response.assert_status_ok();
        let hospitals: Vec<Value> = response.json();
        assert_eq!(hospitals.len(), 2);
        assert!(hospitals.iter().all(|h| h["region"] == "North"));

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_only_super_user_creates_hospitals(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));
        let body = json!({
            "name": "Hilltop Hospital",
            "address": "9 Summit Road",
            "region": "South",
            "email": "hilltop@hospital.test"
        });

        server
            .post("/hospitals")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&body)
            .await
            .assert_status_forbidden();

        let response = server
            .post("/hospitals")
            .add_header(auth(), bearer(ROOT))
            .json(&body)
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["name"], "Hilltop Hospital");

        server
            .post("/hospitals")
            .add_header(auth(), bearer(ROOT))
            .json(&body)
            .await
            .assert_status(StatusCode::CONFLICT);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_update_and_delete_hospital(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        // renaming onto another hospital's name
        server
            .patch("/hospitals/3")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "name": "Harbor Clinic" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        let response = server
            .patch("/hospitals/3")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "contact_number": "+15559999" }))
            .await;
        response.assert_status_ok();
        let hospital: Value = response.json();
        assert_eq!(hospital["contact_number"], "+15559999");
        assert_eq!(hospital["name"], "Valley Medical Center");

        server
            .delete("/hospitals/3")
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .delete("/hospitals/3")
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "equipment", "inventory", "resources")))]
    async fn test_hospital_summary(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/hospitals/1/summary")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await;
        response.assert_status_ok();
        let summary: Value = response.json();
        assert_eq!(summary["asset_count"], 4);
        assert_eq!(summary["doctors"], 16);
        assert_eq!(summary["nurses"], 30);
        assert_eq!(summary["equipment_types"], 2);
        assert_eq!(summary["low_stock_items"], 0);

        let response = server
            .get("/hospitals/2/summary")
            .add_header(auth(), bearer(MINISTRY))
            .await;
        response.assert_status_ok();
        let summary: Value = response.json();
        assert_eq!(summary["doctors"], 0);
        assert_eq!(summary["low_stock_items"], 1);

        server
            .get("/hospitals/2/summary")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status_forbidden();

        Ok(())
    }

    // ============================================================
    // /diseases, /equipment
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "diseases", "reports")))]
    async fn test_disease_catalog(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/diseases")
            .add_header(auth(), bearer(CITIZEN))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 3);

        server
            .post("/diseases")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({ "name": "Cholera" }))
            .await
            .assert_status_forbidden();

        server
            .post("/diseases")
            .add_header(auth(), bearer(MINISTRY))
            .json(&json!({ "name": "Cholera", "description": "Waterborne" }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .post("/diseases")
            .add_header(auth(), bearer(MINISTRY))
            .json(&json!({ "name": "Dengue" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        // Dengue is referenced by reports, Influenza is not
        server
            .delete("/diseases/1")
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .delete("/diseases/3")
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get("/diseases/3")
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "equipment")))]
    async fn test_equipment_catalog(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/equipment")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&json!({ "name": "Defibrillator" }))
            .await
            .assert_status_forbidden();

        let response = server
            .post("/equipment")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "name": "Defibrillator" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["equipment_id"].as_i64().expect("id");

        server
            .patch(&format!("/equipment/{}", id))
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "name": "Ventilator" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        let response = server
            .get("/equipment")
            .add_header(auth(), bearer(CITIZEN))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 4);

        server
            .delete(&format!("/equipment/{}", id))
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        Ok(())
    }

    // ============================================================
    // /assets, /human-resources
    // ============================================================

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "resources")))]
    async fn test_assets_are_managed_by_hospital_admins(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/assets")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&json!({ "name": "Minibus", "asset_type": "CAR", "quantity": 1 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let asset: Value = response.json();
        assert_eq!(asset["hospital_id"], 1);
        assert_eq!(asset["asset_type"], "CAR");

        // encoders read but do not manage assets
        server
            .post("/assets")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .json(&json!({ "name": "Minibus", "asset_type": "CAR", "quantity": 1 }))
            .await
            .assert_status_forbidden();

        let response = server
            .get("/assets")
            .add_query_param("asset_type", "CAR")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 2);

        // asset 3 belongs to Harbor Clinic
        server
            .patch("/assets/3")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&json!({ "quantity": 5 }))
            .await
            .assert_status_forbidden();

        server
            .delete("/assets/1")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users", "resources")))]
    async fn test_human_resources(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/human-resources")
            .add_query_param("staff_type", "DOCTOR")
            .add_header(auth(), bearer(ROOT))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 2);

        server
            .post("/human-resources")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "staff_type": "NURSE", "headcount": 3 }))
            .await
            .assert_status_bad_request();

        let response = server
            .post("/human-resources")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "hospital_id": 3, "staff_type": "NURSE", "headcount": 3 }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["hr_id"].as_i64().expect("id");

        let response = server
            .patch(&format!("/human-resources/{}", id))
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "headcount": 6 }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["headcount"], 6);

        server
            .patch(&format!("/human-resources/{}", id))
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "headcount": -1 }))
            .await
            .assert_status_bad_request();

        server
            .get(&format!("/human-resources/{}", id))
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status_forbidden();

        Ok(())
    }
}
