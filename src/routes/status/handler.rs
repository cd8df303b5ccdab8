use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::AppState;
use crate::cache::parse_monitor_ids;
use crate::error::StatusError;
use crate::models::MonitorStatus;

#[derive(Debug, Deserialize)]
pub struct MonitorsQuery {
    pub monitors: Option<String>,
}

/// GET /status/monitors?monitors=<id1>-<id2>
#[axum::debug_handler]
pub async fn get_monitors(
    State(state): State<AppState>,
    Query(query): Query<MonitorsQuery>,
) -> Result<Json<Vec<MonitorStatus>>, StatusError> {
    let monitor_ids = query
        .monitors
        .as_deref()
        .map(parse_monitor_ids)
        .unwrap_or_default();

    let statuses = state.status_proxy.get_statuses(&monitor_ids).await?;
    Ok(Json(statuses))
}
