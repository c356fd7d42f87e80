pub mod http_handler;
pub mod middleware;

pub use http_handler::{AppState, router};
