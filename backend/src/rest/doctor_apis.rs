//! # REST API for Doctor Profiles

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::error::AppError;
use crate::rest::extract::Json;
use crate::AppState;
use shared::{ApiResponse, CreateDoctorRequest};

/// Create a doctor profile
pub async fn create_doctor(
    State(state): State<AppState>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/doctors - request: {:?}", request);

    let doctor = state.doctor_service.create_doctor(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("doctor created", doctor)),
    ))
}
