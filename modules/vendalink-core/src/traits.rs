// Trait seam between the dispatcher and the HTTP client.
//
// The dispatcher owns the per-endpoint success criteria, so the trait
// surfaces raw status + body; an `Err` means the backend was never
// reached. Tests swap in `testing::MockApi`.

use anyhow::Result;
use async_trait::async_trait;

use inventario_client::{
    ApiResponse, ContainerDispense, InventarioClient, NewSale, NewSensorReading,
};

#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `POST /sensores`
    async fn record_sensor_reading(&self, reading: &NewSensorReading) -> Result<ApiResponse>;

    /// `POST /contenedores/dispensar`
    async fn dispense(&self, dispense: &ContainerDispense) -> Result<ApiResponse>;

    /// `POST /ventas`
    async fn register_sale(&self, sale: &NewSale) -> Result<ApiResponse>;
}

#[async_trait]
impl InventoryApi for InventarioClient {
    async fn record_sensor_reading(&self, reading: &NewSensorReading) -> Result<ApiResponse> {
        Ok(self.post_sensor_reading(reading).await?)
    }

    async fn dispense(&self, dispense: &ContainerDispense) -> Result<ApiResponse> {
        Ok(self.post_dispense(dispense).await?)
    }

    async fn register_sale(&self, sale: &NewSale) -> Result<ApiResponse> {
        Ok(self.post_sale(sale).await?)
    }
}
