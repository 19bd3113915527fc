//! The per-message dispatch pipeline and the channel run loop.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use inventario_client::{ApiResponse, ContainerDispense, NewSale, NewSensorReading};

use crate::error::DispatchError;
use crate::payload;
use crate::topic::{self, Route};
use crate::traits::InventoryApi;
use crate::units;

/// `metodo_dispensado` reported for valve-triggered sales.
pub const DISPENSE_METHOD_VALVE: &str = "valvula";

/// One message as delivered by the transport. Nothing outlives the
/// dispatch cycle that consumes it.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// What a successful dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    SensorRecorded,
    Dispensed,
    /// Valve confirmation: inventory updated *and* sale registered.
    SaleRegistered,
    /// Topic matched no shape; no API call was made.
    Ignored,
}

/// Translates classified messages into backend API calls.
///
/// Stateless across messages: every call sequence is derived from one
/// message alone, so instances are freely shareable.
pub struct Dispatcher<A: InventoryApi> {
    api: A,
}

impl<A: InventoryApi> Dispatcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Consume messages until the channel closes. Failures are scoped to
    /// their message and logged with enough context to reconstruct it;
    /// the loop itself never fails.
    pub async fn run(&self, mut rx: mpsc::Receiver<InboundMessage>) {
        while let Some(msg) = rx.recv().await {
            match self.handle(&msg).await {
                Ok(outcome) => debug!(topic = %msg.topic, ?outcome, "Message dispatched"),
                Err(err) => warn!(
                    topic = %msg.topic,
                    payload = %String::from_utf8_lossy(&msg.payload),
                    error = %err,
                    "Message dropped"
                ),
            }
        }
        info!("Inbound channel closed, dispatcher stopping");
    }

    /// Classify, decode and issue the API call sequence for one message.
    pub async fn handle(&self, msg: &InboundMessage) -> Result<Outcome, DispatchError> {
        match topic::classify(&msg.topic)? {
            Route::Sensor {
                machine_id,
                sensor_type,
            } => self.handle_sensor(machine_id, sensor_type, &msg.payload).await,
            Route::Dispensing { machine_id } => {
                self.handle_dispensing(machine_id, &msg.payload).await
            }
            Route::ValveConfirmation {
                machine_id,
                valve_pin,
            } => self.handle_valve(machine_id, valve_pin, &msg.payload).await,
            Route::Unrecognized => {
                warn!(topic = %msg.topic, "Topic matches no known shape, ignoring");
                Ok(Outcome::Ignored)
            }
        }
    }

    async fn handle_sensor(
        &self,
        machine_id: String,
        sensor_type: String,
        raw: &[u8],
    ) -> Result<Outcome, DispatchError> {
        let value = payload::decode_sensor_value(raw)?;
        let unit = units::unit_for(&sensor_type);
        let reading = NewSensorReading {
            machine_id,
            sensor_type,
            value_numeric: value,
            unit: unit.to_string(),
        };

        let resp = self
            .api
            .record_sensor_reading(&reading)
            .await
            .map_err(transport_err)?;
        expect_status(resp, 201)?;

        info!(
            machine_id = %reading.machine_id,
            sensor_type = %reading.sensor_type,
            value,
            unit,
            "Sensor reading recorded"
        );
        Ok(Outcome::SensorRecorded)
    }

    async fn handle_dispensing(
        &self,
        machine_id: u32,
        raw: &[u8],
    ) -> Result<Outcome, DispatchError> {
        let decoded = payload::decode_dispense(raw)?;
        let dispense = ContainerDispense {
            machine_id,
            product_id: decoded.product_id,
            quantity: decoded.quantity,
        };

        let resp = self.api.dispense(&dispense).await.map_err(transport_err)?;
        expect_status(resp, 200)?;

        info!(
            machine_id,
            product_id = decoded.product_id,
            quantity = decoded.quantity,
            "Container dispense recorded"
        );
        Ok(Outcome::Dispensed)
    }

    /// Two chained calls. The sale is only registered once the inventory
    /// update has come back 200 — this ordering is the business invariant
    /// of the whole bridge and must stay sequential.
    async fn handle_valve(
        &self,
        machine_id: u32,
        valve_pin: u32,
        raw: &[u8],
    ) -> Result<Outcome, DispatchError> {
        let decoded = payload::decode_valve(raw)?;

        let dispense = ContainerDispense {
            machine_id,
            product_id: decoded.product_id,
            quantity: decoded.quantity,
        };
        let resp = self.api.dispense(&dispense).await.map_err(transport_err)?;
        expect_status(resp, 200)?;

        let sale = NewSale {
            machine_id,
            product_id: decoded.product_id,
            quantity: decoded.quantity,
            valve_pin,
            dispense_method: DISPENSE_METHOD_VALVE.to_string(),
        };
        let resp = self.api.register_sale(&sale).await.map_err(transport_err)?;
        expect_status(resp, 201)?;

        info!(
            machine_id,
            valve_pin,
            product_id = decoded.product_id,
            quantity = decoded.quantity,
            state = %decoded.state,
            "Valve dispense confirmed, sale registered"
        );
        Ok(Outcome::SaleRegistered)
    }
}

fn expect_status(resp: ApiResponse, expected: u16) -> Result<(), DispatchError> {
    if resp.is_status(expected) {
        Ok(())
    } else {
        Err(DispatchError::ApiCall {
            status: resp.status,
            body: resp.body,
        })
    }
}

fn transport_err(err: anyhow::Error) -> DispatchError {
    DispatchError::Transport(err.to_string())
}
