// Repository modules
pub mod auth_repository;
pub mod baby_repository;
pub mod consultation_repository;
pub mod doctor_repository;
pub mod reminder_repository;
pub mod schedule_repository;
pub mod vaccination_repository;

// Re-export repository types
pub use auth_repository::AuthRepository;
pub use baby_repository::BabyRepository;
pub use consultation_repository::ConsultationRepository;
pub use doctor_repository::DoctorRepository;
pub use reminder_repository::ReminderRepository;
pub use schedule_repository::ScheduleRepository;
pub use vaccination_repository::VaccinationRepository;
