use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::classifier::ClassifiedFailure;

/// How an invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Success,
    /// A mapping entry chose the status
    Classified,
    /// No entry matched; the fallback status was used
    Unclassified,
}

/// Result of running work through the wrapper: the raw value or a
/// classified failure, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure(ClassifiedFailure),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Success(_) => StatusCode::OK,
            Outcome::Failure(failure) => failure.status(),
        }
    }

    pub fn disposition(&self) -> Disposition {
        match self {
            Outcome::Success(_) => Disposition::Success,
            Outcome::Failure(failure) if failure.is_classified() => Disposition::Classified,
            Outcome::Failure(_) => Disposition::Unclassified,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ClassifiedFailure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn into_result(self) -> Result<T, ClassifiedFailure> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Success(value) => (StatusCode::OK, Json(value)).into_response(),
            Outcome::Failure(failure) => {
                let (status, envelope) = failure.into_parts();
                envelope.with_status(status).into_response()
            }
        }
    }
}
