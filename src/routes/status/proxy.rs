use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::cache::{StatusCache, monitor_status_key};
use crate::error::StatusError;
use crate::models::MonitorStatus;
use crate::upstream::MonitorSource;

type StatusResult = Result<Vec<MonitorStatus>, StatusError>;
type SharedFetch = Shared<BoxFuture<'static, StatusResult>>;

/// 监控状态代理：缓存命中直接返回，未命中时请求上游并写入缓存
///
/// 同一缓存键的并发请求共享一次上游调用。
#[derive(Clone)]
pub struct StatusProxy {
    source: Arc<dyn MonitorSource>,
    cache: Arc<StatusCache>,
    in_flight: Arc<Mutex<HashMap<String, SharedFetch>>>,
}

impl StatusProxy {
    pub fn new(source: Arc<dyn MonitorSource>, cache: Arc<StatusCache>) -> Self {
        Self {
            source,
            cache,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get_statuses(&self, monitor_ids: &[String]) -> StatusResult {
        if !self.source.is_configured() {
            return Err(StatusError::UpstreamMisconfigured);
        }

        if monitor_ids.is_empty() || monitor_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(StatusError::InvalidRequest);
        }

        let key = monitor_status_key(monitor_ids);
        if let Some(data) = self.cached(&key).await {
            return Ok(data);
        }

        let fetch = {
            let mut in_flight = self.in_flight.lock().await;

            // 等锁期间其他请求可能已经写入缓存
            if let Some(data) = self.cached(&key).await {
                return Ok(data);
            }

            if let Some(pending) = in_flight.get(&key).cloned() {
                debug!("[Status API] Joining in-flight fetch: {}", key);
                pending
            } else {
                info!("[Status API] Cache miss, fetching from UptimeRobot: {}", key);
                let pending = self.start_fetch(key.clone(), monitor_ids.to_vec());
                in_flight.insert(key, pending.clone());
                pending
            }
        };

        fetch.await
    }

    async fn cached(&self, key: &str) -> Option<Vec<MonitorStatus>> {
        let (data, age) = self.cache.get(key).await?;
        info!(
            "[Status API] Returning cached data (age: {}ms)",
            age.as_millis()
        );
        Some(data)
    }

    fn start_fetch(&self, key: String, monitor_ids: Vec<String>) -> SharedFetch {
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);

        // 上游请求在独立任务中执行，调用方断开后仍会完成并写入缓存
        let task = tokio::spawn(async move {
            let start = Instant::now();
            let result = source.fetch_monitors(&monitor_ids).await;

            match &result {
                Ok(data) => {
                    info!(
                        "[Status API] UptimeRobot responded in {}ms",
                        start.elapsed().as_millis()
                    );
                    cache.store(&key, data.clone()).await;
                }
                Err(e) => {
                    error!("[Status API] Failed to fetch from UptimeRobot: {}", e);
                }
            }

            in_flight.lock().await.remove(&key);
            result.map_err(StatusError::from)
        });

        async move {
            task.await.unwrap_or_else(|e| {
                Err(StatusError::UpstreamUnavailable(format!(
                    "fetch task failed: {}",
                    e
                )))
            })
        }
        .boxed()
        .shared()
    }
}
