//! 上游监控服务（UptimeRobot）

mod model;
mod uptime_robot;

pub use model::{MonitorId, UptimeRobotMonitor, UptimeRobotResponse, normalize};
pub use uptime_robot::UptimeRobotClient;

use async_trait::async_trait;

use crate::error::UpstreamError;
use crate::models::MonitorStatus;

/// 状态代理背后的监控数据源
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait MonitorSource: Send + Sync {
    /// 是否已配置访问上游所需的凭据
    fn is_configured(&self) -> bool;

    /// 按给定的监控 ID 请求一次上游，返回规范化后的结果
    async fn fetch_monitors(&self, monitor_ids: &[String])
    -> Result<Vec<MonitorStatus>, UpstreamError>;
}
