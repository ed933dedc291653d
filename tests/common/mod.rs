#![allow(dead_code)]

use axum::{Json, Router, http::StatusCode, routing::post};
use axum_test::TestServer;
use healthsync::{AppState, Config};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_JWT_SECRET: &str = "healthsync-test-secret-that-is-long-enough";

/// Fixture accounts (see fixtures/users.sql)
pub const ROOT: (i64, &str) = (1, "root");
pub const MINISTRY: (i64, &str) = (2, "ministry");
pub const GENERAL_ADMIN: (i64, &str) = (3, "gh_admin");
pub const GENERAL_ENCODER: (i64, &str) = (4, "gh_encoder");
pub const HARBOR_ENCODER: (i64, &str) = (5, "hc_encoder");
pub const CITIZEN: (i64, &str) = (6, "citizen");

fn test_config(mail_endpoint_url: Option<String>, prediction_api_url: Option<String>) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        max_connections: 1,
        app_env: "test".to_string(),
        app_base_url: "http://dashboard.test".to_string(),
        mail_endpoint_url,
        prediction_api_url,
    }
}

/// AppState without outbound collaborators
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    create_test_state_with(pool, None, None)
}

/// AppState pointing the mail and prediction calls at the given URLs
pub fn create_test_state_with(
    pool: SqlitePool,
    mail_endpoint_url: Option<String>,
    prediction_api_url: Option<String>,
) -> Arc<AppState> {
    let config = test_config(mail_endpoint_url, prediction_api_url);
    Arc::new(AppState::new(pool, &config))
}

pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = healthsync::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Generates a JWT for testing, valid for 24 hours
pub fn create_test_jwt(user_id: i64, username: &str, jwt_secret: &str) -> String {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Claims {
        id: i64,
        username: String,
        exp: usize,
        iat: usize,
    }

    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(24))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        id: user_id,
        username: username.to_string(),
        exp: expiration,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("Failed to create JWT token")
}

/// `Bearer <token>` value for one of the fixture accounts
pub fn bearer(account: (i64, &str)) -> String {
    format!("Bearer {}", create_test_jwt(account.0, account.1, TEST_JWT_SECRET))
}

/// Local HTTP endpoint recording every JSON body POSTed to it
pub struct MockUpstream {
    pub url: String,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl MockUpstream {
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().expect("mock lock poisoned").clone()
    }

    /// Waits until at least `count` bodies arrived, or gives up after two seconds
    pub async fn wait_for(&self, count: usize) -> Vec<Value> {
        for _ in 0..40 {
            if self.received().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.received()
    }
}

/// Spawns a mock upstream answering every POST with `status` and `reply`
pub async fn spawn_mock_upstream(status: StatusCode, reply: Value) -> MockUpstream {
    let received = Arc::new(Mutex::new(Vec::new()));
    let captured = received.clone();

    let app = Router::new().route(
        "/",
        post(move |Json(body): Json<Value>| {
            let captured = captured.clone();
            let reply = reply.clone();
            async move {
                captured.lock().expect("mock lock poisoned").push(body);
                (status, Json(reply))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().expect("mock upstream address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock upstream failed");
    });

    MockUpstream {
        url: format!("http://{}/", addr),
        received,
    }
}
