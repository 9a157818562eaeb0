//! Error types for the Kohonen SOM crate.

use thiserror::Error;

/// The main error type for SOM operations.
#[derive(Error, Debug)]
pub enum KohonenError {
    /// Invalid model or training configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input data column count does not match the model's input dimension.
    #[error("Dimension mismatch: input data has {actual} features, expected {expected}")]
    DimensionMismatch {
        /// The input dimension the model was built with.
        expected: usize,
        /// The column count of the offending dataset.
        actual: usize,
    },

    /// Error during training.
    #[error("Training error: {0}")]
    Training(String),

    /// Error loading or generating a dataset.
    #[error("Data error: {0}")]
    Data(String),

    /// Error rendering the weight grid.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for SOM operations.
pub type Result<T> = std::result::Result<T, KohonenError>;

impl From<serde_json::Error> for KohonenError {
    fn from(err: serde_json::Error) -> Self {
        KohonenError::Serialization(err.to_string())
    }
}
