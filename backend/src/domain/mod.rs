//! # Domain Module
//!
//! Business logic for the booking backend.
//!
//! Services validate requests, enforce ownership and availability rules, and
//! delegate persistence to the repositories in [`crate::storage`]. They know
//! nothing about HTTP; the REST layer translates their errors into responses.
//!
//! ## Module Organization
//!
//! - **auth_service**: OTP issue/verify and session resolution
//! - **baby_service**: Baby profiles and the owner list
//! - **doctor_service**: Doctor profiles
//! - **schedule_service**: Weekly availability registration and day status
//! - **booking_service**: The consultation booking flow and its slot-exclusivity rule
//! - **vaccination_service**: Vaccination appointment booking
//! - **dates**: Date and wall-clock time parsing shared by the services

pub mod auth_service;
pub mod baby_service;
pub mod booking_service;
pub mod dates;
pub mod doctor_service;
pub mod schedule_service;
pub mod vaccination_service;

pub use auth_service::AuthService;
pub use baby_service::BabyService;
pub use booking_service::BookingService;
pub use doctor_service::DoctorService;
pub use schedule_service::ScheduleService;
pub use vaccination_service::VaccinationService;
