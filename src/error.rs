use std::time::Duration;

use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 上游监控接口调用错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    #[error("UptimeRobot API key is not configured")]
    MissingCredential,

    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("UptimeRobot API returned status: {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("UptimeRobot API returned error status: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatusError {
    #[error("monitors query parameter is required")]
    InvalidRequest,

    #[error("UptimeRobot API key is not configured on the server")]
    UpstreamMisconfigured,

    #[error("Failed to fetch monitor statuses")]
    UpstreamUnavailable(String),
}

impl From<UpstreamError> for StatusError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::MissingCredential => StatusError::UpstreamMisconfigured,
            other => StatusError::UpstreamUnavailable(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let status = match self {
            StatusError::InvalidRequest => StatusCode::BAD_REQUEST,
            StatusError::UpstreamMisconfigured | StatusError::UpstreamUnavailable(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            StatusError::UpstreamUnavailable(cause) => Some(cause.clone()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
