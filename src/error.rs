use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Preview error: {0}")]
    Preview(String),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
