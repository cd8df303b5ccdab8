//! 轮询 `STATUS_MONITORS` 中配置的监控状态并打印每次结果，Ctrl+C 退出

use status_backend::client::{StatusClient, StatusPoller};
use status_backend::config::ClientConfig;
use status_backend::models::MonitorStatus;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let client = StatusClient::new(&config);
    let poller = StatusPoller::new(client, config.monitors.clone(), config.poll_interval());
    let (mut rx, handle) = poller.spawn(async {
        let _ = tokio::signal::ctrl_c().await;
    });

    while rx.changed().await.is_ok() {
        let statuses = rx.borrow_and_update().clone();
        report(&statuses);
    }

    if let Err(e) = handle.await {
        error!("Poller task failed: {}", e);
    }
}

fn report(statuses: &[MonitorStatus]) {
    if statuses.is_empty() {
        info!("Status unavailable");
        return;
    }

    for monitor in statuses {
        let ping = monitor
            .response_time
            .map(|ms| format!("{}ms", ms.round()))
            .unwrap_or_else(|| "N/A".to_string());
        info!(
            "{} [{:?}] uptime(7d) {}% ping {} {}",
            monitor.name, monitor.status, monitor.uptime, ping, monitor.url
        );
    }
}
