//! Error types for the sismo_forecast crate

use sismo_catalogue::CatalogueError;
use sismo_math::MathError;
use thiserror::Error;

/// Custom error types for the sismo_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Not enough samples to fit the model
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(MathError),

    /// Error from catalogue loading or queries
    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from reading configuration
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData(message) => ForecastError::InsufficientData(message),
            MathError::InvalidInput(message) => ForecastError::InvalidParameter(message),
            other => ForecastError::Math(other),
        }
    }
}
