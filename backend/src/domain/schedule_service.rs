use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::domain::dates;
use crate::error::AppError;
use crate::storage::{DoctorRepository, ScheduleRepository};
use shared::{
    DayStatus, RegisterScheduleRequest, RegisteredWeek, ScheduleDay, ScheduleDayInput, Slot,
};

/// Service for doctor availability management
#[derive(Clone)]
pub struct ScheduleService {
    doctors: DoctorRepository,
    schedule: ScheduleRepository,
}

impl ScheduleService {
    pub fn new(doctors: DoctorRepository, schedule: ScheduleRepository) -> Self {
        Self { doctors, schedule }
    }

    /// Register availability for a batch of days.
    ///
    /// Days are upserted one at a time in request order and validation fails
    /// fast: a bad entry aborts the rest of the batch, but days already
    /// written stay written. Callers must not assume atomicity across days.
    pub async fn register_week(
        &self,
        doctor_id: &str,
        request: RegisterScheduleRequest,
    ) -> Result<RegisteredWeek, AppError> {
        info!(
            "Registering {} day(s) for doctor {}",
            request.days.len(),
            doctor_id
        );

        if self.doctors.get_doctor(doctor_id).await?.is_none() {
            return Err(AppError::not_found("doctor not found"));
        }
        if request.days.is_empty() {
            return Err(AppError::invalid_input("no days to register"));
        }

        let mut dates = Vec::with_capacity(request.days.len());
        for day in &request.days {
            let (date, slots) = Self::validate_day(day)?;
            let stored = self
                .schedule
                .upsert_day(&ScheduleDay {
                    id: Uuid::new_v4().to_string(),
                    doctor_id: doctor_id.to_string(),
                    date,
                    status: DayStatus::Available,
                    note: day.note.clone().unwrap_or_default(),
                    slots,
                })
                .await?;
            dates.push(stored.date);
        }

        info!("Registered {} day(s) for doctor {}", dates.len(), doctor_id);

        Ok(RegisteredWeek {
            doctor_id: doctor_id.to_string(),
            dates,
        })
    }

    /// Get the schedule day for (doctor, date)
    pub async fn get_day(&self, doctor_id: &str, date_text: &str) -> Result<ScheduleDay, AppError> {
        if self.doctors.get_doctor(doctor_id).await?.is_none() {
            return Err(AppError::not_found("doctor not found"));
        }
        let date = dates::parse_date(date_text.trim())?;

        self.schedule
            .get_day(doctor_id, date)
            .await?
            .ok_or_else(|| AppError::not_found("no schedule for this date"))
    }

    /// Change the day-level status for (doctor, date)
    pub async fn set_day_status(
        &self,
        doctor_id: &str,
        date_text: &str,
        status_text: &str,
    ) -> Result<ScheduleDay, AppError> {
        if self.doctors.get_doctor(doctor_id).await?.is_none() {
            return Err(AppError::not_found("doctor not found"));
        }
        let date = dates::parse_date(date_text.trim())?;
        let status = DayStatus::parse(status_text.trim()).ok_or_else(|| {
            AppError::invalid_input(format!("unknown day status: {status_text}"))
        })?;

        let changed = self.schedule.set_day_status(doctor_id, date, status).await?;
        if !changed {
            return Err(AppError::not_found("no schedule for this date"));
        }

        info!("Set {} on {} to {}", doctor_id, date, status);

        self.schedule
            .get_day(doctor_id, date)
            .await?
            .ok_or_else(|| AppError::not_found("no schedule for this date"))
    }

    /// Validate one day entry; slot times come back normalized to HH:MM.
    fn validate_day(day: &ScheduleDayInput) -> Result<(NaiveDate, Vec<Slot>), AppError> {
        if day.date.trim().is_empty() {
            return Err(AppError::invalid_input("day is missing a date"));
        }
        let date = dates::parse_date(day.date.trim())?;

        if day.slots.is_empty() {
            return Err(AppError::invalid_input(format!(
                "no slots given for {date}"
            )));
        }

        let mut slots = Vec::with_capacity(day.slots.len());
        let mut seen = HashSet::new();
        for slot in &day.slots {
            let start = dates::parse_time(slot.start_time.trim())?;
            let end = dates::parse_time(slot.end_time.trim())?;
            if start >= end {
                return Err(AppError::invalid_input(format!(
                    "slot {}-{} ends before it starts",
                    slot.start_time, slot.end_time
                )));
            }
            // Two rows for the same times would both match the booking update
            if !seen.insert((start, end)) {
                return Err(AppError::invalid_input(format!(
                    "duplicate slot {}-{}",
                    slot.start_time, slot.end_time
                )));
            }
            slots.push(Slot {
                start_time: start.format("%H:%M").to_string(),
                end_time: end.format("%H:%M").to_string(),
                booked: false,
                occupant_id: None,
            });
        }

        Ok((date, slots))
    }
}
