pub mod details;
pub mod health;

pub use details::{find_all, find_by_category, not_found, save};
pub use health::{health_check, metrics_endpoint, readiness_check};
