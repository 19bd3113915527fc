use std::env;

/// Bridge configuration, read from the environment once at startup and
/// passed by reference from there on.
#[derive(Debug, Clone)]
pub struct Config {
    pub mqtt_host: String,
    pub mqtt_port: u16,
    pub mqtt_client_id: String,
    pub api_base_url: String,
    /// Bound of the transport → dispatcher channel.
    pub channel_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mqtt_host: env::var("MQTT_BROKER_HOST").unwrap_or_else(|_| "localhost".to_string()),
            mqtt_port: env::var("MQTT_BROKER_PORT")
                .unwrap_or_else(|_| "1883".to_string())
                .parse()
                .expect("MQTT_BROKER_PORT must be a number"),
            mqtt_client_id: env::var("MQTT_CLIENT_ID")
                .unwrap_or_else(|_| "vendalink-bridge".to_string()),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            channel_capacity: env::var("CHANNEL_CAPACITY")
                .unwrap_or_else(|_| "64".to_string())
                .parse()
                .expect("CHANNEL_CAPACITY must be a number"),
        }
    }
}
