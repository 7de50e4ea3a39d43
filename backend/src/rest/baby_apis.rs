//! # REST API for Baby Profiles

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::error::AppError;
use crate::rest::extract::{CurrentParent, Json};
use crate::AppState;
use shared::{ApiResponse, CreateBabyRequest};

/// Create a baby profile owned by the signed-in parent
pub async fn create_baby(
    State(state): State<AppState>,
    CurrentParent(parent): CurrentParent,
    Json(request): Json<CreateBabyRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("POST /api/babies - request: {:?}", request);

    let baby = state.baby_service.create_baby(&parent, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("baby created", baby)),
    ))
}
