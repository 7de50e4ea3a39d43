//! # REST API for Consultation Booking

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::error::AppError;
use crate::rest::extract::{CurrentParent, Json};
use crate::AppState;
use shared::{ApiResponse, BookConsultationRequest};

/// Book a consultation slot for a baby
pub async fn book_consultation(
    State(state): State<AppState>,
    CurrentParent(parent): CurrentParent,
    Json(request): Json<BookConsultationRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/consultations/book - request: {:?}", request);

    let consultation = state
        .booking_service
        .book_consultation(&parent, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("consultation booked", consultation)),
    ))
}
