//! HTTP API handlers for survival-api

pub mod health;
pub mod logging;
pub mod passengers;

pub use health::health_routes;
pub use logging::log_request;
pub use passengers::passenger_routes;
