//! # Nestling Backend
//!
//! REST backend for the Nestling baby-care product. It covers phone OTP
//! sign-in, baby profiles with parent ownership, doctor schedules, and
//! consultation and vaccination booking.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! REST layer (axum handlers, bearer-token extraction)
//!     |
//! Domain layer (services, validation, booking rules)
//!     |
//! Storage layer (SQLite repositories)
//! ```
//!
//! The one real invariant lives in the booking path: a slot can be booked at
//! most once, enforced by a conditional update rather than a read-modify-write
//! of the whole day.

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod rest;
pub mod storage;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::Config;
use crate::db::DbConnection;
use crate::domain::{
    AuthService, BabyService, BookingService, DoctorService, ScheduleService, VaccinationService,
};
use crate::storage::{
    AuthRepository, BabyRepository, ConsultationRepository, DoctorRepository, ReminderRepository,
    ScheduleRepository, VaccinationRepository,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub baby_service: BabyService,
    pub doctor_service: DoctorService,
    pub schedule_service: ScheduleService,
    pub booking_service: BookingService,
    pub vaccination_service: VaccinationService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain services");
    Ok(build_state(db, config.otp_ttl_minutes))
}

fn build_state(db: DbConnection, otp_ttl_minutes: i64) -> AppState {
    let auth = AuthRepository::new(db.clone());
    let babies = BabyRepository::new(db.clone());
    let doctors = DoctorRepository::new(db.clone());
    let schedule = ScheduleRepository::new(db.clone());
    let consultations = ConsultationRepository::new(db.clone());
    let vaccinations = VaccinationRepository::new(db.clone());
    let reminders = ReminderRepository::new(db);

    AppState {
        auth_service: AuthService::new(auth, otp_ttl_minutes),
        baby_service: BabyService::new(babies.clone()),
        doctor_service: DoctorService::new(doctors.clone()),
        schedule_service: ScheduleService::new(doctors.clone(), schedule.clone()),
        booking_service: BookingService::new(
            babies.clone(),
            doctors,
            schedule,
            consultations,
            reminders.clone(),
        ),
        vaccination_service: VaccinationService::new(babies, vaccinations, reminders),
    }
}

/// Build the application state on a throwaway test database
#[cfg(test)]
pub(crate) async fn test_state() -> (AppState, DbConnection) {
    let db = DbConnection::init_test()
        .await
        .expect("Failed to create test database");
    (build_state(db.clone(), 5), db)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow app clients to make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/auth/otp/request", post(rest::request_otp))
        .route("/auth/otp/verify", post(rest::verify_otp))
        .route("/babies", post(rest::create_baby))
        .route("/doctors", post(rest::create_doctor))
        .route(
            "/doctors/:doctor_id/schedule",
            post(rest::register_schedule).get(rest::get_schedule_day),
        )
        .route(
            "/doctors/:doctor_id/schedule/:date/status",
            put(rest::set_day_status),
        )
        .route("/consultations/book", post(rest::book_consultation))
        .route("/vaccinations/book", post(rest::book_vaccination));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
