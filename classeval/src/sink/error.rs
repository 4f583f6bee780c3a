use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Unable to write metrics: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to serialize metrics: {0}")]
    Serialize(#[from] serde_json::Error),
}
