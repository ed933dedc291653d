//! Configuration - Loads the service settings from the environment (and `.env`)

use dotenv::dotenv;
use std::env;
use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "healthsync-development-secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub app_env: String,
    /// Public base URL of the dashboard, used to build links inside alert emails
    pub app_base_url: String,
    /// Internal mail-sending endpoint that receives low-stock alerts
    pub mail_endpoint_url: Option<String>,
    /// External disease-prediction service
    pub prediction_api_url: Option<String>,
}

impl Config {
    /// Loads the configuration from environment variables.
    /// Calls dotenv() first so a local `.env` file is honoured.
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEFAULT_JWT_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let app_base_url = env::var("APP_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", server_host, server_port))
            .trim_end_matches('/')
            .to_string();

        let mail_endpoint_url = non_empty_var("MAIL_ENDPOINT_URL");
        let prediction_api_url = non_empty_var("PREDICTION_API_URL");

        Ok(Config {
            database_url,
            jwt_secret,
            server_host,
            server_port,
            max_connections,
            app_env,
            app_base_url,
            mail_endpoint_url,
            prediction_api_url,
        })
    }

    /// Logs the configuration, hiding secrets
    pub fn print_info(&self) {
        info!("Server configuration:");
        info!("  Environment: {}", self.app_env);
        info!("  Server address: {}:{}", self.server_host, self.server_port);
        info!("  Database: {}", Self::mask_url(&self.database_url));
        info!("  Max DB connections: {}", self.max_connections);
        info!("  Dashboard base URL: {}", self.app_base_url);
        info!(
            "  Mail endpoint: {}",
            self.mail_endpoint_url.as_deref().unwrap_or("not configured (alerts disabled)")
        );
        info!(
            "  Prediction service: {}",
            self.prediction_api_url.as_deref().unwrap_or("not configured")
        );
        if self.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("  JWT secret: USING DEFAULT (INSECURE!)");
        } else {
            info!("  JWT secret: custom secret configured");
        }
    }

    /// Masks the credentials part of a database URL for logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        // sqlite urls carry no credentials
        if url.starts_with("sqlite:") {
            return url.to_string();
        }
        "***".to_string()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
