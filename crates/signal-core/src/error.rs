use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}
