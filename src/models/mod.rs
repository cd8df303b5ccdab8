mod monitor;

pub use monitor::{MonitorState, MonitorStatus, parse_response_time};
