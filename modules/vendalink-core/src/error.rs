use thiserror::Error;

/// Everything that can go wrong with a single message. All variants are
/// message-scoped: the run loop logs them and moves on to the next message.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Malformed topic '{topic}': {reason}")]
    MalformedTopic { topic: String, reason: String },

    #[error("Invalid sensor payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(String),

    #[error("Payload missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("API call failed (status {status}): {body}")]
    ApiCall { status: u16, body: String },

    #[error("API unreachable: {0}")]
    Transport(String),
}
