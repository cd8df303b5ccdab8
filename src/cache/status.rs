use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::models::MonitorStatus;

struct CacheEntry {
    data: Vec<MonitorStatus>,
    stored_at: Instant,
}

impl CacheEntry {
    fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }
}

/// 进程内监控状态缓存
///
/// 条目在 `ttl` 内有效；过期条目在读取时被忽略，在下次写入时覆盖。
/// 条目数量达到 `max_entries` 时先清理过期条目，再淘汰最早写入的条目。
pub struct StatusCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl StatusCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 返回未过期的缓存数据及其存活时间
    pub async fn get(&self, key: &str) -> Option<(Vec<MonitorStatus>, Duration)> {
        let entries = self.entries.lock().await;
        let entry = entries.get(key)?;
        let age = entry.age(Instant::now());
        if age < self.ttl {
            Some((entry.data.clone(), age))
        } else {
            None
        }
    }

    pub async fn store(&self, key: &str, data: Vec<MonitorStatus>) {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let ttl = self.ttl;
            entries.retain(|_, entry| entry.age(now) < ttl);

            while entries.len() >= self.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.stored_at)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(k) => {
                        debug!("Evicting status cache entry: {}", k);
                        entries.remove(&k);
                    }
                    None => break,
                }
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                stored_at: now,
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
