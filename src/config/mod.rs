use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_UPTIME_ROBOT_API_URL: &str = "https://api.uptimerobot.com/v2/getMonitors";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub api_key: Option<String>,
    pub uptime_robot_api_key: Option<String>,
    pub uptime_robot_api_url: String,
    pub status_cache_ttl_secs: u64,
    pub status_cache_max_entries: usize,
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3001,
            api_base_uri: "/api".to_string(),
            api_key: None,
            uptime_robot_api_key: None,
            uptime_robot_api_url: DEFAULT_UPTIME_ROBOT_API_URL.to_string(),
            status_cache_ttl_secs: 60,
            status_cache_max_entries: 256,
            upstream_timeout_secs: 35,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let defaults = Config::default();
        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", defaults.server_port)?,
            api_base_uri: normalize_base_uri(
                &env::var("API_BASE_URI").unwrap_or(defaults.api_base_uri),
            ),
            api_key: optional("API_KEY"),
            uptime_robot_api_key: optional("UPTIME_ROBOT_API_KEY"),
            uptime_robot_api_url: env::var("UPTIME_ROBOT_API_URL")
                .unwrap_or(defaults.uptime_robot_api_url),
            status_cache_ttl_secs: parse_or("STATUS_CACHE_TTL_SECS", defaults.status_cache_ttl_secs)?,
            status_cache_max_entries: parse_or(
                "STATUS_CACHE_MAX_ENTRIES",
                defaults.status_cache_max_entries,
            )?,
            upstream_timeout_secs: parse_or("UPSTREAM_TIMEOUT_SECS", defaults.upstream_timeout_secs)?,
        })
    }

    pub fn status_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.status_cache_ttl_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// 状态轮询客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub status_api_url: Option<String>,
    pub api_key: Option<String>,
    pub monitors: Vec<String>,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Ok(ClientConfig {
            status_api_url: optional("STATUS_API_URL"),
            api_key: optional("API_KEY"),
            monitors: configured_monitors(env::var("STATUS_MONITORS").ok().as_deref()),
            poll_interval_secs: parse_or("STATUS_POLL_INTERVAL_SECS", 60)?,
            request_timeout_secs: parse_or("UPSTREAM_TIMEOUT_SECS", 35)?,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// 解析逗号分隔的监控ID列表，忽略空项
pub fn configured_monitors(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// 规范化接口前缀：保证以 `/` 开头且不以 `/` 结尾，根路径返回空串
pub fn normalize_base_uri(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_monitors_drops_blanks() {
        let ids = configured_monitors(Some("111, 222,,  ,333"));
        assert_eq!(ids, vec!["111", "222", "333"]);
    }

    #[test]
    fn configured_monitors_empty_when_unset() {
        assert!(configured_monitors(None).is_empty());
        assert!(configured_monitors(Some("")).is_empty());
    }

    #[test]
    fn base_uri_gets_leading_slash_and_loses_trailing_one() {
        assert_eq!(normalize_base_uri("api"), "/api");
        assert_eq!(normalize_base_uri("/api/"), "/api");
        assert_eq!(normalize_base_uri(" //v1/status// "), "/v1/status");
        assert_eq!(normalize_base_uri("/"), "");
        assert_eq!(normalize_base_uri(""), "");
    }

    #[test]
    fn defaults_match_upstream_contract() {
        let config = Config::default();
        assert_eq!(config.status_cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.upstream_timeout(), Duration::from_secs(35));
        assert_eq!(config.uptime_robot_api_url, DEFAULT_UPTIME_ROBOT_API_URL);
        assert!(config.uptime_robot_api_key.is_none());
    }
}
