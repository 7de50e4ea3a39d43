use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::DoctorRepository;
use shared::{CreateDoctorRequest, Doctor};

/// Service for managing doctor profiles
#[derive(Clone)]
pub struct DoctorService {
    doctors: DoctorRepository,
}

impl DoctorService {
    pub fn new(doctors: DoctorRepository) -> Self {
        Self { doctors }
    }

    /// Create a doctor profile
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("doctor name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(AppError::invalid_input(
                "doctor name cannot exceed 100 characters",
            ));
        }

        let specialty = request
            .specialty
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "pediatrics".to_string());

        let doctor = Doctor {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            specialty,
            created_at: Utc::now(),
        };
        self.doctors.store_doctor(&doctor).await?;

        info!("Created doctor {} ({})", doctor.id, doctor.name);

        Ok(doctor)
    }

    /// Get a doctor by ID
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>, AppError> {
        Ok(self.doctors.get_doctor(doctor_id).await?)
    }
}
