mod config;
mod transport;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use inventario_client::InventarioClient;
use vendalink_core::Dispatcher;

use crate::config::Config;
use crate::transport::MqttTransport;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("vendalink_bridge=info".parse()?)
                .add_directive("vendalink_core=info".parse()?),
        )
        .init();

    info!("Vendalink bridge starting...");

    // Load config
    let config = Config::from_env();
    info!(
        broker = %format!("{}:{}", config.mqtt_host, config.mqtt_port),
        api_base_url = %config.api_base_url,
        "Configuration loaded"
    );

    let (tx, rx) = mpsc::channel(config.channel_capacity);

    let dispatcher = Dispatcher::new(InventarioClient::new(config.api_base_url.clone()));
    let dispatch_task = tokio::spawn(async move { dispatcher.run(rx).await });

    // Blocks until the broker connection is permanently gone. An error
    // before the first ConnAck is the startup-fatal condition.
    let transport = MqttTransport::new(&config);
    transport.run(tx).await?;

    dispatch_task.await?;
    info!("Vendalink bridge stopped");
    Ok(())
}
