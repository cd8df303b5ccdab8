mod handler;
mod proxy;

pub use handler::{MonitorsQuery, get_monitors};
pub use proxy::StatusProxy;
