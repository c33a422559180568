mod handler;
mod model;

pub use handler::check_location;
pub use model::{CheckLocationRequest, CheckLocationResponse};
