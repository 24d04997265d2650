use thiserror::Error;

#[derive(Debug, Error)]
pub enum FiscalError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown activity type: {0}")]
    UnknownActivity(String),

    #[error("Invalid tax schedule: {0}")]
    InvalidSchedule(String),

    #[error("Advisory service unavailable: {0}")]
    AdvisoryUnavailable(String),

    #[error("Calculation failure in {context}: {reason}")]
    CalculationFailure { context: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FiscalError {
    fn from(e: serde_json::Error) -> Self {
        FiscalError::SerializationError(e.to_string())
    }
}
