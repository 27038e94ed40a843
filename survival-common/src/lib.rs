//! # Survival Common Library
//!
//! Shared code for the passenger survival scoring service:
//! - Error types
//! - Configuration loading
//! - Passenger domain types (feature layout, probability, fixed-point codec)
//! - API request/response types
//! - Operational event log
//! - Identifier generation

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod passenger;

pub use error::{Error, Result};
pub use passenger::{PassengerRecord, Probability};
