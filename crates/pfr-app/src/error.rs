//! Error types for the pfr-app service layer.

/// Application error type that wraps errors from the lower crates and
/// provides a unified error interface for both CLI and GUI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] pfr_client::ClientError),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    RunFailed(String),

    #[error("Run worker error: {0}")]
    Worker(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pfr-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<pfr_core::CoreError> for AppError {
    fn from(err: pfr_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<pfr_results::ResultsError> for AppError {
    fn from(err: pfr_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
