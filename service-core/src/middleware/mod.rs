pub mod cors;
pub mod metrics;
pub mod request_id;

pub use cors::any_origin_cors;
pub use metrics::metrics_middleware;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
