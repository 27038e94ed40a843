//! survival-api library
//!
//! Scores passenger feature vectors against a pre-trained classifier and keeps
//! the results in a record store, behind a small HTTP API.

pub mod api;
pub mod error;
pub mod features;
pub mod model;
pub mod service;
pub mod store;

pub use crate::error::{ApiError, ApiResult, ScoringError, ServiceError, ValidationError};
pub use crate::service::PassengerService;

use axum::{middleware, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Passenger record service (classifier and store injected)
    pub service: Arc<PassengerService>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: PassengerService) -> Self {
        Self {
            service: Arc::new(service),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::passenger_routes())
        .merge(api::health_routes())
        .with_state(state)
        .layer(middleware::from_fn(api::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
