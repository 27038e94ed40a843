//! Shared API types for the survival service

pub mod types;

pub use types::{
    CreatePassengerRequest, DeleteResponse, ErrorResponse, PassengerListResponse,
    PassengerProbabilityResponse, PassengerResponse,
};
