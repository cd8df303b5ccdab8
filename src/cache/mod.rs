// 缓存模块
// 进程内的监控状态缓存及缓存键生成

pub mod keys;
mod status;

pub use keys::{monitor_status_key, parse_monitor_ids};
pub use status::StatusCache;
