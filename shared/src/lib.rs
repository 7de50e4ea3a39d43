use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parent account, created on first successful OTP verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    pub id: String,
    /// Phone number in the form it was verified with
    pub phone: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A baby profile. Ownership is a list of parent ids; the creating parent
/// is always the first owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baby {
    pub id: String,
    pub name: String,
    pub birthdate: NaiveDate,
    pub sex: Option<String>,
    /// Inactive babies are hidden from booking flows
    pub active: bool,
    pub parent_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub created_at: DateTime<Utc>,
}

/// A doctor's availability record for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub note: String,
    /// Slots in the order the doctor registered them
    pub slots: Vec<Slot>,
}

/// A bookable time range within a schedule day.
///
/// `occupant_id` is non-null exactly when `booked` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Wall-clock start, "HH:MM"
    pub start_time: String,
    /// Wall-clock end, "HH:MM"
    pub end_time: String,
    pub booked: bool,
    pub occupant_id: Option<String>,
}

/// Day-level availability of a schedule day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Available,
    Busy,
    Off,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Available => "available",
            DayStatus::Busy => "busy",
            DayStatus::Off => "off",
        }
    }

    pub fn parse(s: &str) -> Option<DayStatus> {
        match s {
            "available" => Some(DayStatus::Available),
            "busy" => Some(DayStatus::Busy),
            "off" => Some(DayStatus::Off),
            _ => None,
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The persisted result of a successful slot booking, linking parent, baby,
/// doctor and the booked schedule day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub parent_id: String,
    pub baby_id: String,
    pub doctor_id: String,
    pub schedule_day_id: String,
    /// The day's date combined with the slot's start time
    pub scheduled_at: NaiveDateTime,
    pub status: ConsultationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Scheduled,
    Completed,
    Canceled,
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Scheduled => "scheduled",
            ConsultationStatus::Completed => "completed",
            ConsultationStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<ConsultationStatus> {
        match s {
            "scheduled" => Some(ConsultationStatus::Scheduled),
            "completed" => Some(ConsultationStatus::Completed),
            "canceled" => Some(ConsultationStatus::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vaccination appointment for a baby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vaccination {
    pub id: String,
    pub parent_id: String,
    pub baby_id: String,
    pub vaccine: String,
    pub due_date: NaiveDate,
    pub status: VaccinationStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccinationStatus {
    Scheduled,
    Done,
}

impl VaccinationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaccinationStatus::Scheduled => "scheduled",
            VaccinationStatus::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<VaccinationStatus> {
        match s {
            "scheduled" => Some(VaccinationStatus::Scheduled),
            "done" => Some(VaccinationStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reminder queued for a parent after a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub parent_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestOtpRequest {
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub code: String,
    /// Display name used only when the verification creates a new parent
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBabyRequest {
    pub name: String,
    /// ISO 8601 date, YYYY-MM-DD
    pub birthdate: String,
    pub sex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub specialty: Option<String>,
}

/// One slot of a day being registered; times are wall-clock "HH:MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotInput {
    pub start_time: String,
    pub end_time: String,
}

/// One day of a weekly schedule registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDayInput {
    /// ISO 8601 date, YYYY-MM-DD
    pub date: String,
    pub slots: Vec<SlotInput>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterScheduleRequest {
    pub days: Vec<ScheduleDayInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDayStatusRequest {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookConsultationRequest {
    pub doctor_id: String,
    pub baby_id: String,
    /// Booking date; YYYY-MM-DD, or an RFC 3339 instant truncated to its date
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookVaccinationRequest {
    pub baby_id: String,
    pub vaccine: String,
    /// ISO 8601 date, YYYY-MM-DD
    pub due_date: String,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// Success envelope shared by every endpoint: `{"message": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Issued by OTP verification; the token goes into the Authorization header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub parent: Parent,
}

/// Expiry information returned after an OTP has been issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpIssued {
    pub phone: String,
    pub expires_at: DateTime<Utc>,
}

/// Summary of a completed weekly registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisteredWeek {
    pub doctor_id: String,
    pub dates: Vec<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_status_roundtrip() {
        for status in [DayStatus::Available, DayStatus::Busy, DayStatus::Off] {
            assert_eq!(DayStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DayStatus::parse("closed"), None);
        assert_eq!(DayStatus::parse(""), None);
    }

    #[test]
    fn test_consultation_status_roundtrip() {
        for status in [
            ConsultationStatus::Scheduled,
            ConsultationStatus::Completed,
            ConsultationStatus::Canceled,
        ] {
            assert_eq!(ConsultationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ConsultationStatus::parse("cancelled"), None);
    }

    #[test]
    fn test_vaccination_status_roundtrip() {
        for status in [VaccinationStatus::Scheduled, VaccinationStatus::Done] {
            assert_eq!(VaccinationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(VaccinationStatus::parse("pending"), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DayStatus::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(
            serde_json::to_string(&ConsultationStatus::Scheduled).unwrap(),
            "\"scheduled\""
        );
    }

    #[test]
    fn test_api_response_shape() {
        let envelope = ApiResponse::new("created", 7);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["message"], "created");
        assert_eq!(json["data"], 7);
    }
}
