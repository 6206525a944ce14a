//! Route-level error type.
//!
//! Services return their own `thiserror` enums. Handlers convert them into
//! [`ApiError`] with `?`, which renders a status code and a JSON body of the
//! form `{ "error": "..." }`. Internal details are logged, not returned.
//! Bodies that fail to deserialize are reported the same way, as 400.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::contract::ContractError;
use crate::services::room::RoomError;
use crate::services::svg_store::SvgStoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("database not configured")]
    Unavailable,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "internal server error".to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<RoomError> for ApiError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::NotFound(_) => Self::NotFound(err.to_string()),
            RoomError::Invalid(_) | RoomError::PathTaken { .. } => Self::BadRequest(err.to_string()),
            RoomError::Database(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<ContractError> for ApiError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::NotFound(_) => Self::NotFound(err.to_string()),
            ContractError::Invalid(_) | ContractError::UnknownRoom(_) => Self::BadRequest(err.to_string()),
            ContractError::Database(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<SvgStoreError> for ApiError {
    fn from(err: SvgStoreError) -> Self {
        match err {
            SvgStoreError::NotFound(_) => Self::NotFound(err.to_string()),
            SvgStoreError::InvalidFloor(_) | SvgStoreError::NotSvg(_) => Self::BadRequest(err.to_string()),
            SvgStoreError::Io(e) => Self::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
