//! # REST API for Doctor Schedules
//!
//! Weekly availability registration, day lookup, and day-status changes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::rest::extract::Json;
use crate::AppState;
use shared::{ApiResponse, RegisterScheduleRequest, SetDayStatusRequest};

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: String,
}

/// Register a batch of availability days for a doctor
pub async fn register_schedule(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
    Json(request): Json<RegisterScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "POST /api/doctors/{}/schedule - {} day(s)",
        doctor_id,
        request.days.len()
    );

    let registered = state
        .schedule_service
        .register_week(&doctor_id, request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("schedule registered", registered)),
    ))
}

/// Get a doctor's schedule day, slots included
pub async fn get_schedule_day(
    State(state): State<AppState>,
    Path(doctor_id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<impl IntoResponse, AppError> {
    info!("GET /api/doctors/{}/schedule?date={}", doctor_id, query.date);

    let day = state.schedule_service.get_day(&doctor_id, &query.date).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new("schedule day retrieved", day)),
    ))
}

/// Change the day-level status of a schedule day
pub async fn set_day_status(
    State(state): State<AppState>,
    Path((doctor_id, date)): Path<(String, String)>,
    Json(request): Json<SetDayStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!(
        "PUT /api/doctors/{}/schedule/{}/status - {}",
        doctor_id, date, request.status
    );

    let day = state
        .schedule_service
        .set_day_status(&doctor_id, &date, &request.status)
        .await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new("day status updated", day)),
    ))
}
