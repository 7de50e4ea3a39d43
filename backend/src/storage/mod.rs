//! # Storage Module
//!
//! Data persistence for the booking backend. Repositories wrap raw SQL
//! behind focused interfaces so domain services never see the database
//! directly; connection management lives in [`crate::db`].

pub mod sqlite;

pub use sqlite::repositories::{
    AuthRepository, BabyRepository, ConsultationRepository, DoctorRepository,
    ReminderRepository, ScheduleRepository, VaccinationRepository,
};
