//! Integration tests for user management

mod common;

#[cfg(test)]
mod user_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::http::HeaderName;
    use serde_json::{Value, json};
    use sqlx::SqlitePool;

    fn auth() -> HeaderName {
        HeaderName::from_static("authorization")
    }

    fn new_user(role: &str, hospital_id: Option<i64>) -> Value {
        json!({
            "username": "fresh_user",
            "email": "fresh@healthsync.test",
            "full_name": "Fresh User",
            "password": "passw0rdX",
            "role": role,
            "hospital_id": hospital_id
        })
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_super_user_creates_any_role(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .post("/users")
            .add_header(auth(), bearer(ROOT))
            .json(&new_user("HOSPITAL_ADMIN", Some(2)))
            .await;
        response.assert_status(StatusCode::CREATED);
        let user: Value = response.json();
        assert_eq!(user["role"], "HOSPITAL_ADMIN");
        assert_eq!(user["hospital_id"], 2);

        // hospital-bound roles need a hospital
        server
            .post("/users")
            .add_header(auth(), bearer(ROOT))
            .json(&json!({
                "username": "orphan",
                "email": "orphan@healthsync.test",
                "full_name": "Orphan",
                "password": "passw0rdX",
                "role": "DATA_ENCODER"
            }))
            .await
            .assert_status_bad_request();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_hospital_admin_creates_own_encoders_only(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .post("/users")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&new_user("GOVERNMENT", None))
            .await
            .assert_status_forbidden();

        server
            .post("/users")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&new_user("DATA_ENCODER", Some(2)))
            .await
            .assert_status_forbidden();

        let response = server
            .post("/users")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .json(&new_user("DATA_ENCODER", None))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["hospital_id"], 1);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_list_users_is_scoped(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .get("/users")
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await;
        response.assert_status_ok();
        let users: Vec<Value> = response.json();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u["hospital_id"] == 1));

        let response = server
            .get("/users")
            .add_query_param("role", "DATA_ENCODER")
            .add_header(auth(), bearer(ROOT))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Value>>().len(), 2);

        server
            .get("/users")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .await
            .assert_status_forbidden();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_self_update_cannot_escalate(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .patch(&format!("/users/{}", CITIZEN.0))
            .add_header(auth(), bearer(CITIZEN))
            .json(&json!({ "full_name": "Casey Renamed" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["full_name"], "Casey Renamed");

        server
            .patch(&format!("/users/{}", CITIZEN.0))
            .add_header(auth(), bearer(CITIZEN))
            .json(&json!({ "role": "SUPER_USER" }))
            .await
            .assert_status_forbidden();

        server
            .patch(&format!("/users/{}", CITIZEN.0))
            .add_header(auth(), bearer(CITIZEN))
            .json(&json!({ "email": "root@healthsync.test" }))
            .await
            .assert_status(StatusCode::CONFLICT);

        // role changes by a super user take effect on the next request
        server
            .patch(&format!("/users/{}", CITIZEN.0))
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "role": "GOVERNMENT" }))
            .await
            .assert_status_ok();

        server
            .get("/reports")
            .add_header(auth(), bearer(CITIZEN))
            .await
            .assert_status_ok();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_role_change_off_hospital_clears_assignment(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        let response = server
            .patch(&format!("/users/{}", GENERAL_ADMIN.0))
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "role": "GOVERNMENT" }))
            .await;
        response.assert_status_ok();
        let user: Value = response.json();
        assert_eq!(user["role"], "GOVERNMENT");
        assert!(user["hospital_id"].is_null());

        // a role change inside the hospital tiers keeps the hospital
        let response = server
            .patch(&format!("/users/{}", GENERAL_ENCODER.0))
            .add_header(auth(), bearer(ROOT))
            .json(&json!({ "role": "HOSPITAL_ADMIN" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["hospital_id"], 1);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_get_user_visibility(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .get(&format!("/users/{}", CITIZEN.0))
            .add_header(auth(), bearer(CITIZEN))
            .await
            .assert_status_ok();

        server
            .get(&format!("/users/{}", ROOT.0))
            .add_header(auth(), bearer(CITIZEN))
            .await
            .assert_status_forbidden();

        server
            .get(&format!("/users/{}", HARBOR_ENCODER.0))
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status_forbidden();

        server
            .get("/users/404")
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status_not_found();

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("hospitals", "users")))]
    async fn test_delete_rules(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(create_test_state(pool));

        server
            .delete(&format!("/users/{}", ROOT.0))
            .add_header(auth(), bearer(ROOT))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .delete(&format!("/users/{}", HARBOR_ENCODER.0))
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status_forbidden();

        server
            .delete(&format!("/users/{}", GENERAL_ENCODER.0))
            .add_header(auth(), bearer(GENERAL_ADMIN))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        // the deleted account's token no longer authenticates
        server
            .get("/users/me")
            .add_header(auth(), bearer(GENERAL_ENCODER))
            .await
            .assert_status_unauthorized();

        Ok(())
    }
}
