//! Low-stock notifier - Fire-and-forget alert emails through the mail endpoint
//!
//! An inventory update that leaves a store row below its threshold produces one
//! [`LowStockAlert`]. The alert is POSTed on a spawned task: the request path
//! never waits for it, failures are logged and dropped, nothing is retried.

use crate::dtos::InventoryItemDTO;
use crate::entities::User;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

const MAIL_TIMEOUT: Duration = Duration::from_secs(5);

/// JSON body expected by the mail-sending endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub item: String,
    pub current_level: i64,
    pub threshold_level: i64,
    pub timestamp: DateTime<Utc>,
    pub link: String,
    pub email: String,
    pub person_name: String,
}

pub struct LowStockNotifier {
    client: Client,
    endpoint: Option<String>,
    app_base_url: String,
}

impl LowStockNotifier {
    pub fn new(client: Client, endpoint: Option<String>, app_base_url: String) -> Self {
        Self {
            client,
            endpoint,
            app_base_url,
        }
    }

    /// Builds the alert for an inventory row, addressed to `recipient`
    pub fn build_alert(&self, item: &InventoryItemDTO, recipient: &User) -> LowStockAlert {
        LowStockAlert {
            item: item.equipment_name.clone(),
            current_level: item.quantity,
            threshold_level: item.threshold_level,
            timestamp: Utc::now(),
            link: format!("{}/inventory/{}", self.app_base_url, item.store_id),
            email: recipient.email.clone(),
            person_name: recipient.full_name.clone(),
        }
    }

    /// Spawns the delivery and returns immediately.
    /// Returns `None` when no mail endpoint is configured.
    #[instrument(skip(self, alert), fields(item = %alert.item, current = alert.current_level, threshold = alert.threshold_level))]
    pub fn notify(&self, alert: LowStockAlert) -> Option<JoinHandle<()>> {
        let Some(endpoint) = self.endpoint.clone() else {
            warn!("Low stock detected but no mail endpoint is configured, alert skipped");
            return None;
        };

        let client = self.client.clone();
        debug!("Dispatching low stock alert");
        Some(tokio::spawn(async move {
            match deliver(&client, &endpoint, &alert).await {
                Ok(()) => info!("Low stock alert sent to {}", alert.email),
                Err(e) => error!("Failed to send low stock alert for {}: {}", alert.item, e),
            }
        }))
    }
}

async fn deliver(client: &Client, endpoint: &str, alert: &LowStockAlert) -> Result<(), reqwest::Error> {
    client
        .post(endpoint)
        .timeout(MAIL_TIMEOUT)
        .json(alert)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
