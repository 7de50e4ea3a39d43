use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::dates;
use crate::error::AppError;
use crate::storage::{
    BabyRepository, ConsultationRepository, DoctorRepository, ReminderRepository,
    ScheduleRepository,
};
use shared::{
    BookConsultationRequest, Consultation, ConsultationStatus, DayStatus, Parent, Reminder,
};

/// Service for booking doctor consultations.
///
/// At most one booking ever succeeds per slot. The availability check here
/// is a fast path; the authoritative check is the conditional update in
/// [`ConsultationRepository::book_slot`], so two requests racing past the
/// check still end with one winner and one `Conflict`.
#[derive(Clone)]
pub struct BookingService {
    babies: BabyRepository,
    doctors: DoctorRepository,
    schedule: ScheduleRepository,
    consultations: ConsultationRepository,
    reminders: ReminderRepository,
}

impl BookingService {
    pub fn new(
        babies: BabyRepository,
        doctors: DoctorRepository,
        schedule: ScheduleRepository,
        consultations: ConsultationRepository,
        reminders: ReminderRepository,
    ) -> Self {
        Self {
            babies,
            doctors,
            schedule,
            consultations,
            reminders,
        }
    }

    /// Book a consultation slot for a baby.
    pub async fn book_consultation(
        &self,
        parent: &Parent,
        request: BookConsultationRequest,
    ) -> Result<Consultation, AppError> {
        info!(
            "Booking request: doctor={}, baby={}, date={}, slot={}-{}",
            request.doctor_id, request.baby_id, request.date, request.start_time, request.end_time
        );

        for (field, value) in [
            ("doctor_id", &request.doctor_id),
            ("baby_id", &request.baby_id),
            ("date", &request.date),
            ("start_time", &request.start_time),
            ("end_time", &request.end_time),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::invalid_input(format!("{field} is required")));
            }
        }
        let doctor_id = request.doctor_id.trim();
        let baby_id = request.baby_id.trim();

        let baby = self
            .babies
            .get_baby(baby_id)
            .await?
            .filter(|b| b.active)
            .ok_or_else(|| AppError::not_found("baby not found"))?;
        if !baby.parent_ids.iter().any(|id| id == &parent.id) {
            return Err(AppError::forbidden("you are not an owner of this baby"));
        }

        if self.doctors.get_doctor(doctor_id).await?.is_none() {
            return Err(AppError::not_found("doctor not found"));
        }

        let date = dates::parse_date(request.date.trim())?;
        let start = dates::parse_time(request.start_time.trim())?;
        let end = dates::parse_time(request.end_time.trim())?;
        let start_text = start.format("%H:%M").to_string();
        let end_text = end.format("%H:%M").to_string();

        let day = self
            .schedule
            .get_day(doctor_id, date)
            .await?
            .filter(|d| d.status == DayStatus::Available)
            .ok_or_else(|| AppError::invalid_state("doctor not available on this date"))?;

        let slot = day
            .slots
            .iter()
            .find(|s| s.start_time == start_text && s.end_time == end_text)
            .ok_or_else(|| AppError::not_found("time slot not found"))?;
        if slot.booked {
            return Err(AppError::conflict("already booked"));
        }

        let consultation = Consultation {
            id: Uuid::new_v4().to_string(),
            parent_id: parent.id.clone(),
            baby_id: baby.id.clone(),
            doctor_id: doctor_id.to_string(),
            schedule_day_id: day.id.clone(),
            scheduled_at: date.and_time(start),
            status: ConsultationStatus::Scheduled,
            notes: request.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };

        let booked = self
            .consultations
            .book_slot(&consultation, &start_text, &end_text)
            .await?;
        if !booked {
            // A racing booking landed first
            return Err(AppError::conflict("already booked"));
        }

        info!(
            "Booked {}-{} on {} for baby {} (consultation {})",
            start_text, end_text, date, baby.id, consultation.id
        );

        self.queue_reminder(parent, &consultation).await;

        Ok(consultation)
    }

    /// Reminder creation is best effort; the booking stands even if it fails.
    async fn queue_reminder(&self, parent: &Parent, consultation: &Consultation) {
        let reminder = Reminder {
            id: Uuid::new_v4().to_string(),
            parent_id: parent.id.clone(),
            body: format!(
                "Consultation booked for {}",
                consultation.scheduled_at.format("%Y-%m-%d %H:%M")
            ),
            created_at: Utc::now(),
        };
        if let Err(e) = self.reminders.store_reminder(&reminder).await {
            warn!("Failed to queue booking reminder: {}", e);
        }
    }
}
