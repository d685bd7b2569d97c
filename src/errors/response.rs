use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::failure::Failure;
use super::kinds::ErrorKind;

/// Structured failure body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Message of the failure that actually occurred
    pub message: String,
    /// Kind name of the failure that actually occurred
    pub error_kind: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            error_kind: kind.name().to_string(),
        }
    }

    /// Build the envelope from the original failure.
    pub fn from_failure<F: Failure + ?Sized>(failure: &F) -> Self {
        Self::new(failure.message(), failure.kind())
    }

    /// Attach a status code, producing a response-ready pair
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        self.with_status(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response()
    }
}
