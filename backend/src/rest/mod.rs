//! # REST API Layer
//!
//! Axum handlers that translate HTTP requests into domain service calls.
//! Successes wrap their payload in the `{"message", "data"}` envelope;
//! failures go through [`crate::error::AppError`]'s `IntoResponse`.

pub mod auth_apis;
pub mod baby_apis;
pub mod consultation_apis;
pub mod doctor_apis;
pub mod extract;
pub mod schedule_apis;
pub mod vaccination_apis;

pub use auth_apis::{request_otp, verify_otp};
pub use baby_apis::create_baby;
pub use consultation_apis::book_consultation;
pub use doctor_apis::create_doctor;
pub use schedule_apis::{get_schedule_day, register_schedule, set_day_status};
pub use vaccination_apis::book_vaccination;
