//! 状态接口的调用端：失败时返回空列表的请求封装，以及定时轮询器

mod poller;

pub use poller::StatusPoller;

use std::time::Duration;

use tokio::time::{Instant, timeout};
use tracing::{debug, error, info, warn};

use crate::cache::keys::MONITOR_ID_DELIMITER;
use crate::config::ClientConfig;
use crate::error::UpstreamError;
use crate::middleware::API_KEY_HEADER;
use crate::models::MonitorStatus;

#[derive(Clone)]
pub struct StatusClient {
    http: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

impl StatusClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            config.status_api_url.clone(),
            config.api_key.clone(),
            config.request_timeout(),
        )
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: Option<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            api_key,
            timeout,
        }
    }

    /// 通过后端代理获取监控状态；失败时返回空列表
    pub async fn fetch_statuses(&self, monitor_ids: &[String]) -> Vec<MonitorStatus> {
        let Some(base_url) = self.base_url.as_deref() else {
            error!("Status API URL is not configured");
            return Vec::new();
        };
        if monitor_ids.is_empty() {
            warn!("[StatusClient] No monitors configured");
            return Vec::new();
        }

        let start = Instant::now();
        let url = format!(
            "{}/status/monitors?monitors={}",
            base_url,
            monitor_ids.join(MONITOR_ID_DELIMITER)
        );
        debug!("[StatusClient] Sending request to backend: {}", url);

        match timeout(self.timeout, self.request(&url)).await {
            Ok(Ok(statuses)) => {
                info!(
                    "[StatusClient] Fetch completed in {}ms",
                    start.elapsed().as_millis()
                );
                statuses
            }
            Ok(Err(e)) => {
                error!(
                    "[StatusClient] Failed to fetch monitor statuses after {}ms: {}",
                    start.elapsed().as_millis(),
                    e
                );
                Vec::new()
            }
            Err(_) => {
                error!(
                    "[StatusClient] Request timed out after {}ms",
                    start.elapsed().as_millis()
                );
                Vec::new()
            }
        }
    }

    async fn request(&self, url: &str) -> Result<Vec<MonitorStatus>, UpstreamError> {
        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response
            .json::<Vec<MonitorStatus>>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
