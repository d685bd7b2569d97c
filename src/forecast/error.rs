use crate::errors::{kinds, ErrorKind, Failure};

/// Failures the simulated forecast upstream can produce
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastError {
    #[error("{0}")]
    InvalidOperation(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Invalid temperature range specified")]
    InvalidRange,

    #[error("Operation timed out while retrieving weather forecast")]
    TimedOut,
}

impl ForecastError {
    pub fn unavailable() -> Self {
        Self::InvalidOperation("Weather service is currently unavailable".to_string())
    }
}

impl Failure for ForecastError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOperation(_) => kinds::INVALID_OPERATION,
            Self::RateLimited => kinds::RATE_LIMITED,
            Self::InvalidRange => kinds::ARGUMENT_OUT_OF_RANGE,
            Self::TimedOut => kinds::TIMEOUT,
        }
    }
}
