//! HTTP request/response types
//!
//! Field names are part of the public wire contract and are kept in Portuguese
//! for compatibility with existing clients.

use serde::{Deserialize, Serialize};

use crate::passenger::PassengerRecord;

// ========================================
// Requests
// ========================================

/// Body of `POST /sobreviventes`
///
/// # Examples
///
/// ```
/// use survival_common::api::types::CreatePassengerRequest;
///
/// let request: CreatePassengerRequest =
///     serde_json::from_str(r#"{"caracteristicas": [22.5, 0, 1, 54.3, 2, 0, 0, 1]}"#).unwrap();
/// assert_eq!(request.caracteristicas.len(), 8);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePassengerRequest {
    /// Feature vector: age, parch, sibsp, fare, pclass, sex_male, embarked_Q, embarked_S
    pub caracteristicas: Vec<f64>,
}

// ========================================
// Responses
// ========================================

/// A scored passenger, returned by create and list
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PassengerResponse {
    pub id: String,
    pub probabilidade_sobrevivencia: f64,
}

impl From<PassengerRecord> for PassengerResponse {
    fn from(record: PassengerRecord) -> Self {
        Self {
            id: record.id,
            probabilidade_sobrevivencia: record.probability.value(),
        }
    }
}

/// Body of `GET /sobreviventes`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PassengerListResponse {
    pub sobreviventes: Vec<PassengerResponse>,
}

/// Body of `GET /sobreviventes/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PassengerProbabilityResponse {
    pub probabilidade_sobrevivencia: f64,
}

/// Body of `DELETE /sobreviventes/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Error body for every non-2xx response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error description
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passenger::Probability;

    #[test]
    fn test_passenger_response_from_record() {
        let record = PassengerRecord {
            id: "abc".to_string(),
            probability: Probability::from_fixed_point(7612),
        };
        let json = serde_json::to_value(PassengerResponse::from(record)).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["probabilidade_sobrevivencia"], 76.12);
    }

    #[test]
    fn test_create_request_rejects_missing_field() {
        let result: Result<CreatePassengerRequest, _> = serde_json::from_str(r#"{"features": []}"#);
        assert!(result.is_err());
    }
}
