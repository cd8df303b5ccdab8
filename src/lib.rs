use std::sync::Arc;

use cache::StatusCache;
use config::Config;
use routes::status::StatusProxy;
use upstream::UptimeRobotClient;

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod upstream;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub status_proxy: StatusProxy,
}

impl AppState {
    /// 使用 UptimeRobot 作为上游构建应用状态
    pub fn new(config: Config) -> Self {
        let cache = Arc::new(StatusCache::new(
            config.status_cache_ttl(),
            config.status_cache_max_entries,
        ));
        let source = Arc::new(UptimeRobotClient::new(&config));

        Self {
            status_proxy: StatusProxy::new(source, cache),
            config,
        }
    }
}
