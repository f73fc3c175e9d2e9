//! Herdbook Server - JSON API over the herd records, scan and login flows.

pub mod config;
pub mod routes;
pub mod state;
pub mod toasts;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;
pub use toasts::ToastQueue;
