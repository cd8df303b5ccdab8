use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, header::CONTENT_TYPE},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;
use crate::config::normalize_base_uri;
use crate::middleware::{API_KEY_HEADER, log_errors, verify_api_key};
use crate::routes;

// 需要 API key 的接口
fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/status/monitors", get(routes::status::get_monitors))
        .layer(from_fn_with_state(state.clone(), verify_api_key))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let base = normalize_base_uri(&state.config.api_base_uri);
    let api = api_routes(&state);

    let router = Router::new().route("/health", get(routes::health::health));
    let router = if base.is_empty() {
        router.merge(api)
    } else {
        router.nest(&base, api)
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
        .max_age(Duration::from_secs(60 * 60));

    router
        .layer(from_fn(log_errors))
        .layer(cors)
        .with_state(state)
}
