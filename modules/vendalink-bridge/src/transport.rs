//! MQTT transport task.
//!
//! Owns the rumqttc event loop and forwards every publish into the
//! dispatcher channel. Subscription lifecycle stays here; the dispatcher
//! only ever sees `InboundMessage`s.

use std::time::Duration;

use anyhow::{anyhow, Result};
use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info, warn};

use vendalink_core::InboundMessage;

use crate::config::Config;

/// Topic filters covering the three message shapes. The vending hardware
/// publishes the fixed-arity topics both bare and slash-prefixed, and an
/// MQTT `+` does not match an empty leading level, so those two shapes
/// are subscribed in both forms. The parser trims either way.
const SUBSCRIPTIONS: &[&str] = &[
    "+/sensor/#",
    "maquina/+/venta/dispensado",
    "/maquina/+/venta/dispensado",
    "maquina/+/valvula/+/confirmacion",
    "/maquina/+/valvula/+/confirmacion",
];

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

pub struct MqttTransport {
    client: AsyncClient,
    event_loop: EventLoop,
}

impl MqttTransport {
    pub fn new(config: &Config) -> Self {
        let mut options = MqttOptions::new(
            config.mqtt_client_id.clone(),
            config.mqtt_host.clone(),
            config.mqtt_port,
        );
        options.set_keep_alive(Duration::from_secs(60));

        let (client, event_loop) = AsyncClient::new(options, 10);
        Self { client, event_loop }
    }

    /// Poll the broker until the dispatcher channel closes.
    ///
    /// An error before the first ConnAck means the broker was never
    /// reachable and aborts startup. After that, poll errors are logged
    /// and polling continues so rumqttc can reconnect; subscriptions are
    /// re-issued on every ConnAck.
    pub async fn run(mut self, tx: mpsc::Sender<InboundMessage>) -> Result<()> {
        let mut connected = false;

        loop {
            match self.event_loop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("Connected to MQTT broker");
                    connected = true;
                    self.subscribe_all().await?;
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    debug!(topic = %publish.topic, bytes = publish.payload.len(), "Publish received");
                    let msg = InboundMessage {
                        topic: publish.topic.clone(),
                        payload: publish.payload.to_vec(),
                    };
                    if tx.send(msg).await.is_err() {
                        info!("Dispatcher channel closed, stopping transport");
                        return Ok(());
                    }
                }
                Ok(event) => debug!(?event, "MQTT event"),
                Err(err) if !connected => {
                    return Err(anyhow!("could not establish initial MQTT connection: {err}"));
                }
                Err(err) => {
                    warn!(error = %err, "MQTT connection lost, retrying");
                    time::sleep(RECONNECT_DELAY).await;
                }
            }
        }
    }

    async fn subscribe_all(&self) -> Result<()> {
        for filter in SUBSCRIPTIONS {
            self.client.subscribe(*filter, QoS::AtMostOnce).await?;
            info!(filter, "Subscribed");
        }
        Ok(())
    }
}
