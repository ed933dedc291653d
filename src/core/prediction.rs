//! Prediction client - Forwards regional stock to the external prediction service

use crate::core::AppError;
use crate::dtos::PredictionPayload;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const PREDICTION_TIMEOUT: Duration = Duration::from_secs(10);

pub struct PredictionClient {
    client: Client,
    endpoint: Option<String>,
}

impl PredictionClient {
    pub fn new(client: Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }

    /// POSTs the payload and returns the service's JSON body untouched.
    ///
    /// An answer mentioning "disease not supported" becomes a 422, every other
    /// upstream failure a 502.
    #[instrument(skip(self, payload), fields(disease = %payload.disease, region = %payload.region))]
    pub async fn predict(&self, payload: &PredictionPayload) -> Result<Value, AppError> {
        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            warn!("Prediction requested but PREDICTION_API_URL is not configured");
            AppError::service_unavailable("Prediction service not configured")
        })?;

        debug!("Forwarding {} stock levels to prediction service", payload.inventory.len());
        let response = self
            .client
            .post(endpoint)
            .timeout(PREDICTION_TIMEOUT)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if mentions_unsupported_disease(&body) {
                warn!("Prediction service does not support disease {}", payload.disease);
                return Err(AppError::unprocessable(
                    "Disease not supported by the prediction service",
                ));
            }
            error!("Prediction service answered {}: {}", status, body);
            return Err(AppError::bad_gateway("Prediction service error")
                .with_details(format!("upstream status {}", status)));
        }

        let prediction: Value = serde_json::from_str(&body).map_err(|e| {
            error!("Prediction service returned invalid JSON: {}", e);
            AppError::bad_gateway("Invalid response from prediction service")
        })?;

        // some deployments answer 200 with an error object
        if let Some(message) = prediction.get("error").and_then(Value::as_str) {
            if mentions_unsupported_disease(message) {
                return Err(AppError::unprocessable(
                    "Disease not supported by the prediction service",
                ));
            }
            error!("Prediction service reported an error: {}", message);
            return Err(AppError::bad_gateway("Prediction service error")
                .with_details(message.to_string()));
        }

        info!("Prediction received");
        Ok(prediction)
    }
}

fn mentions_unsupported_disease(text: &str) -> bool {
    text.to_ascii_lowercase().contains("disease not supported")
}
