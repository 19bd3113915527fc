use thiserror::Error;

pub type Result<T> = std::result::Result<T, InventarioError>;

#[derive(Debug, Error)]
pub enum InventarioError {
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for InventarioError {
    fn from(err: reqwest::Error) -> Self {
        InventarioError::Network(err.to_string())
    }
}
