use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("session i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
