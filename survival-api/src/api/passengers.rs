//! Passenger routes
//!
//! - `GET /` welcome string
//! - `POST /sobreviventes` score and store a passenger
//! - `GET /sobreviventes` list stored passengers
//! - `GET /sobreviventes/:id` probability of one passenger
//! - `DELETE /sobreviventes/:id` remove a passenger

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use survival_common::api::{
    CreatePassengerRequest, DeleteResponse, PassengerListResponse, PassengerProbabilityResponse,
    PassengerResponse,
};
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;

pub const WELCOME: &str =
    "Hello! This is an API for scoring Titanic passengers survival probability.";

pub const DELETED_MESSAGE: &str = "Registro deletado com sucesso.";

/// GET /
pub async fn index() -> Json<&'static str> {
    Json(WELCOME)
}

/// POST /sobreviventes
pub async fn create_passenger(
    State(state): State<AppState>,
    body: Result<Json<CreatePassengerRequest>, JsonRejection>,
) -> ApiResult<Json<PassengerResponse>> {
    let Json(request) = body?;
    let record = state.service.create(&request.caracteristicas).await?;
    info!(id = %record.id, probability = %record.probability, "Passenger scored");
    Ok(Json(record.into()))
}

/// GET /sobreviventes
pub async fn list_passengers(
    State(state): State<AppState>,
) -> ApiResult<Json<PassengerListResponse>> {
    let records = state.service.list().await?;
    Ok(Json(PassengerListResponse {
        sobreviventes: records.into_iter().map(PassengerResponse::from).collect(),
    }))
}

/// GET /sobreviventes/:id
pub async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PassengerProbabilityResponse>> {
    let probability = state.service.get(&id).await?;
    Ok(Json(PassengerProbabilityResponse {
        probabilidade_sobrevivencia: probability.value(),
    }))
}

/// DELETE /sobreviventes/:id
pub async fn delete_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    state.service.delete(&id).await?;
    info!(id = %id, "Passenger deleted");
    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// Build passenger routes
pub fn passenger_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/sobreviventes", get(list_passengers).post(create_passenger))
        .route(
            "/sobreviventes/:id",
            get(get_passenger).delete(delete_passenger),
        )
}
