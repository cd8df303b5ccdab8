use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 校验 `x-api-key` 请求头；未配置 API_KEY 时直接放行
pub async fn verify_api_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.config.api_key.as_deref() else {
        return next.run(req).await;
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Unauthorized",
                "message": "API key is required",
            })),
        )
            .into_response(),
        Some(key) if key != expected => {
            warn!("Rejected request to {} with invalid API key", req.uri().path());
            (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Forbidden",
                    "message": "Invalid API key",
                })),
            )
                .into_response()
        }
        Some(_) => next.run(req).await,
    }
}
