use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::error;

const MAX_LOGGED_BODY_BYTES: usize = 4096;

/// 记录所有 5xx 响应的状态码与响应体
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read error response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    // 日志只截取前 MAX_LOGGED_BODY_BYTES 字节，响应体原样返回
    let logged = &bytes[..bytes.len().min(MAX_LOGGED_BODY_BYTES)];
    error!(
        "Server error on {} {} - Status: {}, Body: {}{}",
        method,
        path,
        parts.status,
        String::from_utf8_lossy(logged),
        if bytes.len() > MAX_LOGGED_BODY_BYTES { "..." } else { "" }
    );

    // 重置body以便重新构建响应
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::StatusCode,
        middleware::from_fn,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;

    async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/large",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "x".repeat(10_000)) }),
            )
            .route(
                "/small",
                get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
            )
            .route("/ok", get(|| async { "fine" }))
            .layer(from_fn(log_errors))
    }

    #[tokio::test]
    async fn large_error_body_is_passed_through_whole() {
        let (status, body) = send(app(), "/large").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.len(), 10_000);
        assert!(body.iter().all(|b| *b == b'x'));
    }

    #[tokio::test]
    async fn small_error_and_success_bodies_are_unchanged() {
        let (status, body) = send(app(), "/small").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, b"upstream down");

        let (status, body) = send(app(), "/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"fine");
    }
}
