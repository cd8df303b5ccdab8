use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, timeout};
use tracing::{debug, error, info, warn};

use super::MonitorSource;
use super::model::{UptimeRobotResponse, normalize};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::MonitorStatus;

const CUSTOM_UPTIME_RATIO_DAYS: &str = "7";
const RESPONSE_TIMES_AVERAGE_MINUTES: &str = "180";

#[derive(Clone)]
pub struct UptimeRobotClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl UptimeRobotClient {
    pub fn new(config: &Config) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            config.uptime_robot_api_url.clone(),
            config.uptime_robot_api_key.clone(),
            config.upstream_timeout(),
        )
    }

    pub fn with_client(
        http: reqwest::Client,
        api_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            api_url,
            api_key,
            timeout,
        }
    }

    /// 获取监控状态，任何失败都记录日志并返回空列表
    pub async fn fetch(&self, monitor_ids: &[String]) -> Vec<MonitorStatus> {
        let start = Instant::now();
        match self.try_fetch(monitor_ids).await {
            Ok(statuses) => statuses,
            Err(UpstreamError::Timeout(_)) => {
                error!(
                    "[UptimeRobot] Request timed out after {}ms",
                    start.elapsed().as_millis()
                );
                Vec::new()
            }
            Err(e) => {
                error!(
                    "[UptimeRobot] Failed to fetch monitor statuses after {}ms: {}",
                    start.elapsed().as_millis(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub async fn try_fetch(
        &self,
        monitor_ids: &[String],
    ) -> Result<Vec<MonitorStatus>, UpstreamError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::MissingCredential)?;

        info!("[UptimeRobot] Fetching monitors: {:?}", monitor_ids);
        let start = Instant::now();

        // 超时后丢弃请求 future，连接随之取消
        let response = timeout(self.timeout, self.request(api_key, monitor_ids))
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout))??;

        if !response.is_ok() {
            return Err(UpstreamError::Rejected(response.error_description()));
        }

        info!(
            "[UptimeRobot] Responded in {}ms",
            start.elapsed().as_millis()
        );

        let statuses = normalize(response);
        if statuses.is_empty() {
            warn!("[UptimeRobot] No monitors returned from API");
        }
        Ok(statuses)
    }

    async fn request(
        &self,
        api_key: &str,
        monitor_ids: &[String],
    ) -> Result<UptimeRobotResponse, UpstreamError> {
        let monitors = monitor_ids.join("-");
        let form = [
            ("api_key", api_key),
            ("format", "json"),
            ("monitors", monitors.as_str()),
            ("custom_uptime_ratios", CUSTOM_UPTIME_RATIO_DAYS),
            ("response_times", "1"),
            ("response_times_average", RESPONSE_TIMES_AVERAGE_MINUTES),
        ];

        let response = self
            .http
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("POST {} -> {}", self.api_url, status);
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MonitorSource for UptimeRobotClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_monitors(
        &self,
        monitor_ids: &[String],
    ) -> Result<Vec<MonitorStatus>, UpstreamError> {
        self.try_fetch(monitor_ids).await
    }
}
