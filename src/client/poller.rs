use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use super::StatusClient;
use crate::models::MonitorStatus;

/// 按固定间隔轮询监控状态，结果通过 watch 通道发布
///
/// 空列表表示"暂无数据"，不是错误。
pub struct StatusPoller {
    client: StatusClient,
    monitors: Vec<String>,
    interval: Duration,
}

impl StatusPoller {
    pub fn new(client: StatusClient, monitors: Vec<String>, interval: Duration) -> Self {
        Self {
            client,
            monitors,
            interval,
        }
    }

    pub fn spawn<S>(self, shutdown: S) -> (watch::Receiver<Vec<MonitorStatus>>, JoinHandle<()>)
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = watch::channel(Vec::new());
        let handle = tokio::spawn(self.run(tx, shutdown));
        (rx, handle)
    }

    async fn run<S>(self, tx: watch::Sender<Vec<MonitorStatus>>, shutdown: S)
    where
        S: Future<Output = ()> + Send,
    {
        if self.monitors.is_empty() {
            warn!("[StatusPoller] No monitors configured, not polling");
            return;
        }

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("[StatusPoller] Shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    // 请求进行中也要响应关闭信号
                    let statuses = tokio::select! {
                        _ = &mut shutdown => {
                            info!("[StatusPoller] Shutting down during fetch");
                            break;
                        }
                        statuses = self.client.fetch_statuses(&self.monitors) => statuses,
                    };
                    if tx.send(statuses).is_err() {
                        // 所有接收端都已关闭
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use tokio::sync::oneshot;
    use tokio::time::timeout;

    use super::*;
    use crate::client::tests::{FakeBackend, spawn_backend};

    fn client(base_url: String) -> StatusClient {
        StatusClient::with_client(
            reqwest::Client::new(),
            Some(base_url),
            None,
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn publishes_each_poll_until_shutdown() {
        let fake = FakeBackend::default();
        let url = spawn_backend(fake.clone()).await;
        let poller = StatusPoller::new(
            client(url),
            vec!["111".to_string(), "222".to_string()],
            Duration::from_millis(50),
        );

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let (mut rx, handle) = poller.spawn(async move {
            let _ = stop_rx.await;
        });

        for _ in 0..2 {
            timeout(Duration::from_secs(5), rx.changed())
                .await
                .unwrap()
                .unwrap();
            assert_eq!(rx.borrow().len(), 2);
        }
        assert!(fake.calls.load(Ordering::SeqCst) >= 2);

        stop_tx.send(()).unwrap();
        timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn failed_poll_publishes_empty_result() {
        let fake = FakeBackend {
            fail: true,
            ..FakeBackend::default()
        };
        let url = spawn_backend(fake).await;
        let poller = StatusPoller::new(client(url), vec!["111".to_string()], Duration::from_secs(60));

        let (mut rx, handle) = poller.spawn(std::future::pending());
        timeout(Duration::from_secs(5), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert!(rx.borrow().is_empty());
        handle.abort();
    }

    #[tokio::test]
    async fn shutdown_interrupts_slow_fetch() {
        let fake = FakeBackend {
            delay: Duration::from_secs(30),
            ..FakeBackend::default()
        };
        let url = spawn_backend(fake.clone()).await;
        let poller = StatusPoller::new(
            StatusClient::with_client(
                reqwest::Client::new(),
                Some(url),
                None,
                Duration::from_secs(60),
            ),
            vec!["111".to_string()],
            Duration::from_secs(60),
        );

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let (rx, handle) = poller.spawn(async move {
            let _ = stop_rx.await;
        });

        // 等待第一次请求到达后端
        timeout(Duration::from_secs(5), async {
            while fake.calls.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();

        stop_tx.send(()).unwrap();
        timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test]
    async fn no_monitors_means_no_polling() {
        let fake = FakeBackend::default();
        let url = spawn_backend(fake.clone()).await;
        let poller = StatusPoller::new(client(url), Vec::new(), Duration::from_millis(10));

        let (rx, handle) = poller.spawn(std::future::pending());
        timeout(Duration::from_secs(5), handle).await.unwrap().unwrap();
        assert!(rx.borrow().is_empty());
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }
}
