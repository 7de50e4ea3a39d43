use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::error::AppError;

/// Parse a booking date. Accepts a plain calendar date (YYYY-MM-DD) or an
/// RFC 3339 instant, which is truncated to its date.
pub fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.date_naive());
    }
    Err(AppError::invalid_input(format!("invalid date: {input}")))
}

/// Parse a wall-clock slot time in HH:MM form.
pub fn parse_time(input: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| AppError::invalid_input(format!("invalid time: {input}")))
}
