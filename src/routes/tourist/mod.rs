mod handler;
mod model;

pub use handler::{latest_location, recent_violations};
pub use model::{HistoryQuery, clamp_limit};
