//! # REST API for Phone Sign-In
//!
//! OTP request and verification endpoints. Request bodies are not logged
//! here because they carry codes.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::error::AppError;
use crate::rest::extract::Json;
use crate::AppState;
use shared::{ApiResponse, RequestOtpRequest, VerifyOtpRequest};

/// Request a sign-in code for a phone number
pub async fn request_otp(
    State(state): State<AppState>,
    Json(request): Json<RequestOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/auth/otp/request");

    let issued = state.auth_service.request_otp(request).await?;
    Ok((StatusCode::OK, Json(ApiResponse::new("code sent", issued))))
}

/// Verify a sign-in code and open a session
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/auth/otp/verify");

    let session = state.auth_service.verify_otp(request).await?;
    Ok((StatusCode::OK, Json(ApiResponse::new("signed in", session))))
}
