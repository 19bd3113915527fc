pub mod error;
pub mod types;

pub use error::{InventarioError, Result};
pub use types::{ApiResponse, ContainerDispense, NewSale, NewSensorReading};

use serde::Serialize;

/// HTTP client for the inventory/sales backend.
///
/// Every call returns the raw `ApiResponse` (status + body); only failures
/// to reach the backend at all surface as errors. Retry policy, if any,
/// belongs here rather than in the dispatcher — none is configured.
pub struct InventarioClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventarioClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Record a sensor reading. Backend answers 201 on success.
    pub async fn post_sensor_reading(&self, reading: &NewSensorReading) -> Result<ApiResponse> {
        self.post("/sensores", reading).await
    }

    /// Decrement container inventory for a dispense. Backend answers 200
    /// on success.
    pub async fn post_dispense(&self, dispense: &ContainerDispense) -> Result<ApiResponse> {
        self.post("/contenedores/dispensar", dispense).await
    }

    /// Register a completed sale. Backend answers 201 on success.
    pub async fn post_sale(&self, sale: &NewSale) -> Result<ApiResponse> {
        self.post("/ventas", sale).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%url, status, "API call completed");
        Ok(ApiResponse { status, body })
    }
}
