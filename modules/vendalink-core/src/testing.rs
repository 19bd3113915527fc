// Test double for the InventoryApi seam.
//
// MockApi returns one scripted (status, body) pair per endpoint, all
// successful by default, and records every body it was called with so
// tests can assert on call counts, ordering preconditions and field
// values. `unreachable()` makes every call fail at the transport level.

use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use inventario_client::{ApiResponse, ContainerDispense, NewSale, NewSensorReading};

use crate::traits::InventoryApi;

pub struct MockApi {
    sensor_response: (u16, String),
    dispense_response: (u16, String),
    sale_response: (u16, String),
    unreachable: bool,
    pub sensor_calls: Mutex<Vec<NewSensorReading>>,
    pub dispense_calls: Mutex<Vec<ContainerDispense>>,
    pub sale_calls: Mutex<Vec<NewSale>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            sensor_response: (201, "{}".to_string()),
            dispense_response: (200, "{}".to_string()),
            sale_response: (201, "{}".to_string()),
            unreachable: false,
            sensor_calls: Mutex::new(Vec::new()),
            dispense_calls: Mutex::new(Vec::new()),
            sale_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_sensor(mut self, status: u16, body: &str) -> Self {
        self.sensor_response = (status, body.to_string());
        self
    }

    pub fn on_dispense(mut self, status: u16, body: &str) -> Self {
        self.dispense_response = (status, body.to_string());
        self
    }

    pub fn on_sale(mut self, status: u16, body: &str) -> Self {
        self.sale_response = (status, body.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    fn respond(&self, scripted: &(u16, String)) -> Result<ApiResponse> {
        if self.unreachable {
            bail!("connection refused");
        }
        Ok(ApiResponse {
            status: scripted.0,
            body: scripted.1.clone(),
        })
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryApi for MockApi {
    async fn record_sensor_reading(&self, reading: &NewSensorReading) -> Result<ApiResponse> {
        let resp = self.respond(&self.sensor_response)?;
        self.sensor_calls.lock().unwrap().push(reading.clone());
        Ok(resp)
    }

    async fn dispense(&self, dispense: &ContainerDispense) -> Result<ApiResponse> {
        let resp = self.respond(&self.dispense_response)?;
        self.dispense_calls.lock().unwrap().push(dispense.clone());
        Ok(resp)
    }

    async fn register_sale(&self, sale: &NewSale) -> Result<ApiResponse> {
        let resp = self.respond(&self.sale_response)?;
        self.sale_calls.lock().unwrap().push(sale.clone());
        Ok(resp)
    }
}
