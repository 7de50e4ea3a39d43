use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::dates;
use crate::error::AppError;
use crate::storage::{BabyRepository, ReminderRepository, VaccinationRepository};
use shared::{BookVaccinationRequest, Parent, Reminder, Vaccination, VaccinationStatus};

/// Service for vaccination appointment booking
#[derive(Clone)]
pub struct VaccinationService {
    babies: BabyRepository,
    vaccinations: VaccinationRepository,
    reminders: ReminderRepository,
}

impl VaccinationService {
    pub fn new(
        babies: BabyRepository,
        vaccinations: VaccinationRepository,
        reminders: ReminderRepository,
    ) -> Self {
        Self {
            babies,
            vaccinations,
            reminders,
        }
    }

    /// Book a vaccination appointment for a baby
    pub async fn book_vaccination(
        &self,
        parent: &Parent,
        request: BookVaccinationRequest,
    ) -> Result<Vaccination, AppError> {
        info!(
            "Vaccination request: baby={}, vaccine={}, due={}",
            request.baby_id, request.vaccine, request.due_date
        );

        let vaccine = request.vaccine.trim();
        if request.baby_id.trim().is_empty() || vaccine.is_empty() {
            return Err(AppError::invalid_input(
                "baby_id and vaccine are required",
            ));
        }

        let baby = self
            .babies
            .get_baby(request.baby_id.trim())
            .await?
            .filter(|b| b.active)
            .ok_or_else(|| AppError::not_found("baby not found"))?;
        if !baby.parent_ids.iter().any(|id| id == &parent.id) {
            return Err(AppError::forbidden("you are not an owner of this baby"));
        }

        let due_date = dates::parse_date(request.due_date.trim())?;

        let vaccination = Vaccination {
            id: Uuid::new_v4().to_string(),
            parent_id: parent.id.clone(),
            baby_id: baby.id.clone(),
            vaccine: vaccine.to_string(),
            due_date,
            status: VaccinationStatus::Scheduled,
            notes: request.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.vaccinations.store_vaccination(&vaccination).await?;

        info!(
            "Booked vaccination {} ({}) for baby {}",
            vaccination.id, vaccination.vaccine, baby.id
        );

        // Best effort, same as consultation reminders
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            parent_id: parent.id.clone(),
            body: format!("{} vaccination due {}", vaccination.vaccine, due_date),
            created_at: Utc::now(),
        };
        if let Err(e) = self.reminders.store_reminder(&reminder).await {
            warn!("Failed to queue vaccination reminder: {}", e);
        }

        Ok(vaccination)
    }
}
