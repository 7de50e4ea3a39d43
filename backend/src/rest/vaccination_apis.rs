//! # REST API for Vaccination Booking

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::error::AppError;
use crate::rest::extract::{CurrentParent, Json};
use crate::AppState;
use shared::{ApiResponse, BookVaccinationRequest};

/// Book a vaccination appointment for a baby
pub async fn book_vaccination(
    State(state): State<AppState>,
    CurrentParent(parent): CurrentParent,
    Json(request): Json<BookVaccinationRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/vaccinations/book - request: {:?}", request);

    let vaccination = state
        .vaccination_service
        .book_vaccination(&parent, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("vaccination booked", vaccination)),
    ))
}
