use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::models::{MonitorState, MonitorStatus, parse_response_time};

/// UptimeRobot getMonitors 响应
#[derive(Debug, Clone, Deserialize)]
pub struct UptimeRobotResponse {
    pub stat: String,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub monitors: Option<Vec<UptimeRobotMonitor>>,
}

impl UptimeRobotResponse {
    pub fn is_ok(&self) -> bool {
        self.stat == "ok"
    }

    /// 上游返回的错误描述，没有 error 字段时退回 stat
    pub fn error_description(&self) -> String {
        match &self.error {
            Some(err) => err.to_string(),
            None => format!("stat={}", self.stat),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MonitorId {
    Number(i64),
    Text(String),
}

impl Default for MonitorId {
    fn default() -> Self {
        MonitorId::Text(String::new())
    }
}

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorId::Number(n) => write!(f, "{}", n),
            MonitorId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UptimeRobotMonitor {
    pub id: MonitorId,
    pub friendly_name: String,
    pub url: String,
    pub status: Option<i64>,
    pub all_time_uptime_ratio: Option<String>,
    pub custom_uptime_ratio: Option<String>,
    pub average_response_time: Option<Value>,
}

impl From<UptimeRobotMonitor> for MonitorStatus {
    fn from(monitor: UptimeRobotMonitor) -> Self {
        let status = monitor
            .status
            .map(MonitorState::from_code)
            .unwrap_or(MonitorState::Unknown);

        // 优先使用自定义时间窗口（7天）的可用率
        let uptime = monitor
            .custom_uptime_ratio
            .filter(|ratio| !ratio.is_empty())
            .or(monitor.all_time_uptime_ratio)
            .unwrap_or_default();

        let response_time = match monitor.average_response_time {
            Some(Value::String(raw)) => parse_response_time(&raw),
            Some(Value::Number(n)) => n.as_f64().filter(|ms| *ms > 0.0),
            _ => None,
        };

        Self {
            id: monitor.id.to_string(),
            name: monitor.friendly_name,
            url: monitor.url,
            status,
            uptime,
            response_time,
        }
    }
}

/// 将上游响应转换为统一格式；监控列表为空时返回空数组
pub fn normalize(response: UptimeRobotResponse) -> Vec<MonitorStatus> {
    response
        .monitors
        .unwrap_or_default()
        .into_iter()
        .map(MonitorStatus::from)
        .collect()
}
