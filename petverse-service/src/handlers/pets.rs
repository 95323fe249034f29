use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use service_core::error::AppError;

use super::{ErrorResponse, MessageResponse};
use crate::models::{AdoptionOutcome, AdoptionView, PetView};
use crate::AppState;

pub const RESET_SUCCESS_MESSAGE: &str =
    "✅ All adoptions have been reset! All pets are available again.";
pub const RESET_FAILURE_MESSAGE: &str = "❌ Failed to reset database";

#[derive(Debug, Deserialize)]
pub struct AdoptRequest {
    #[serde(default)]
    pub user_name: String,
    pub pet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AdoptionsQuery {
    #[serde(default)]
    pub user_name: String,
}

/// `GET /api/pets`
pub async fn list_pets(State(state): State<AppState>) -> Result<Json<Vec<PetView>>, AppError> {
    let pets = state.catalog.list_available_pets().await?;
    Ok(Json(pets))
}

/// `POST /api/adopt`
pub async fn adopt(
    State(state): State<AppState>,
    Json(req): Json<AdoptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.adoptions.adopt(&req.user_name, req.pet_id).await?;

    let (status, message) = match outcome {
        AdoptionOutcome::Adopted(adoption) => {
            (StatusCode::OK, format!("You adopted {} ❤️", adoption.pet_name))
        }
        AdoptionOutcome::AlreadyAdopted => (StatusCode::OK, "Already adopted".to_string()),
        AdoptionOutcome::PetNotFound => (StatusCode::NOT_FOUND, "Pet not found".to_string()),
    };

    Ok((status, Json(MessageResponse::new(message))))
}

/// `GET /api/adoptions?user_name=`
pub async fn list_adoptions(
    State(state): State<AppState>,
    Query(query): Query<AdoptionsQuery>,
) -> Result<Json<Vec<AdoptionView>>, AppError> {
    let adoptions = state.adoptions.list_adoptions_for(&query.user_name).await?;
    Ok(Json(adoptions))
}

/// `POST /api/reset`
pub async fn reset(State(state): State<AppState>) -> impl IntoResponse {
    match state.adoptions.reset_all().await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse::new(RESET_SUCCESS_MESSAGE)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Reset failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: RESET_FAILURE_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
    }
}
