use anyhow::Result;
use chrono::NaiveDate;
use shared::{DayStatus, ScheduleDay, Slot};
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for schedule days and their slots
#[derive(Clone)]
pub struct ScheduleRepository {
    db: DbConnection,
}

impl ScheduleRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert or replace the schedule for one (doctor, date).
    ///
    /// Re-registering an existing date keeps the day id stable and swaps the
    /// whole slot list. Day and slots are written in one transaction.
    pub async fn upsert_day(&self, day: &ScheduleDay) -> Result<ScheduleDay> {
        let mut tx = self.db.pool().begin().await?;

        let existing: Option<String> = sqlx::query(
            r#"
            SELECT id FROM schedule_days WHERE doctor_id = ? AND date = ?
            "#,
        )
        .bind(&day.doctor_id)
        .bind(day.date)
        .fetch_optional(&mut *tx)
        .await?
        .map(|r| r.get("id"));

        let day_id = match existing {
            Some(id) => {
                sqlx::query(
                    r#"
                    UPDATE schedule_days SET status = ?, note = ? WHERE id = ?
                    "#,
                )
                .bind(day.status.as_str())
                .bind(&day.note)
                .bind(&id)
                .execute(&mut *tx)
                .await?;

                sqlx::query(
                    r#"
                    DELETE FROM slots WHERE schedule_day_id = ?
                    "#,
                )
                .bind(&id)
                .execute(&mut *tx)
                .await?;

                id
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO schedule_days (id, doctor_id, date, status, note)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&day.id)
                .bind(&day.doctor_id)
                .bind(day.date)
                .bind(day.status.as_str())
                .bind(&day.note)
                .execute(&mut *tx)
                .await?;

                day.id.clone()
            }
        };

        for (position, slot) in day.slots.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO slots (schedule_day_id, position, start_time, end_time, booked, occupant_id)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&day_id)
            .bind(position as i64)
            .bind(&slot.start_time)
            .bind(&slot.end_time)
            .bind(slot.booked)
            .bind(&slot.occupant_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(ScheduleDay {
            id: day_id,
            ..day.clone()
        })
    }

    /// Get the schedule day for (doctor, date), slots in registration order
    pub async fn get_day(&self, doctor_id: &str, date: NaiveDate) -> Result<Option<ScheduleDay>> {
        let row = sqlx::query(
            r#"
            SELECT id, doctor_id, date, status, note
            FROM schedule_days
            WHERE doctor_id = ? AND date = ?
            "#,
        )
        .bind(doctor_id)
        .bind(date)
        .fetch_optional(self.db.pool())
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let day_id: String = r.get("id");
        let status_text: String = r.get("status");
        let status = DayStatus::parse(&status_text)
            .ok_or_else(|| anyhow::anyhow!("Unknown day status: {}", status_text))?;

        let slot_rows = sqlx::query(
            r#"
            SELECT start_time, end_time, booked, occupant_id
            FROM slots
            WHERE schedule_day_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(&day_id)
        .fetch_all(self.db.pool())
        .await?;

        let slots = slot_rows
            .iter()
            .map(|s| Slot {
                start_time: s.get("start_time"),
                end_time: s.get("end_time"),
                booked: s.get("booked"),
                occupant_id: s.get("occupant_id"),
            })
            .collect();

        Ok(Some(ScheduleDay {
            id: day_id,
            doctor_id: r.get("doctor_id"),
            date: r.get("date"),
            status,
            note: r.get("note"),
            slots,
        }))
    }

    /// Change the day-level status for (doctor, date).
    /// Returns false when no schedule day exists for that date.
    pub async fn set_day_status(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        status: DayStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE schedule_days SET status = ? WHERE doctor_id = ? AND date = ?
            "#,
        )
        .bind(status.as_str())
        .bind(doctor_id)
        .bind(date)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> ScheduleRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        ScheduleRepository::new(db)
    }

    fn slot(start: &str, end: &str) -> Slot {
        Slot {
            start_time: start.to_string(),
            end_time: end.to_string(),
            booked: false,
            occupant_id: None,
        }
    }

    fn test_day(id: &str, doctor_id: &str, date: NaiveDate, slots: Vec<Slot>) -> ScheduleDay {
        ScheduleDay {
            id: id.to_string(),
            doctor_id: doctor_id.to_string(),
            date,
            status: DayStatus::Available,
            note: String::new(),
            slots,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get_day() {
        let repo = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");
        let day = test_day(
            "sd1",
            "d1",
            date,
            vec![slot("08:00", "09:00"), slot("09:00", "10:00")],
        );

        repo.upsert_day(&day).await.expect("Failed to upsert day");

        let fetched = repo
            .get_day("d1", date)
            .await
            .expect("Failed to get day")
            .expect("Day should exist");

        assert_eq!(fetched.id, "sd1");
        assert_eq!(fetched.status, DayStatus::Available);
        assert_eq!(fetched.slots.len(), 2);
        assert_eq!(fetched.slots[0].start_time, "08:00");
        assert_eq!(fetched.slots[1].start_time, "09:00");
        assert!(!fetched.slots[0].booked);
        assert!(fetched.slots[0].occupant_id.is_none());
    }

    #[tokio::test]
    async fn test_reregistering_keeps_day_id_and_replaces_slots() {
        let repo = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");

        repo.upsert_day(&test_day(
            "sd1",
            "d1",
            date,
            vec![slot("08:00", "09:00"), slot("09:00", "10:00")],
        ))
        .await
        .expect("Failed to upsert day");

        // Second registration arrives with a fresh candidate id
        let stored = repo
            .upsert_day(&test_day("sd2", "d1", date, vec![slot("14:00", "15:00")]))
            .await
            .expect("Failed to re-upsert day");
        assert_eq!(stored.id, "sd1");

        let fetched = repo
            .get_day("d1", date)
            .await
            .expect("Failed to get day")
            .expect("Day should exist");
        assert_eq!(fetched.id, "sd1");
        assert_eq!(fetched.slots.len(), 1);
        assert_eq!(fetched.slots[0].start_time, "14:00");
    }

    #[tokio::test]
    async fn test_get_day_for_unregistered_date() {
        let repo = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");

        let fetched = repo.get_day("d1", date).await.expect("Query failed");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_set_day_status() {
        let repo = setup_test().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date");

        repo.upsert_day(&test_day("sd1", "d1", date, vec![slot("08:00", "09:00")]))
            .await
            .expect("Failed to upsert day");

        let changed = repo
            .set_day_status("d1", date, DayStatus::Off)
            .await
            .expect("Failed to set status");
        assert!(changed);

        let fetched = repo
            .get_day("d1", date)
            .await
            .expect("Failed to get day")
            .expect("Day should exist");
        assert_eq!(fetched.status, DayStatus::Off);

        let other_date = NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date");
        let changed = repo
            .set_day_status("d1", other_date, DayStatus::Busy)
            .await
            .expect("Failed to set status");
        assert!(!changed);
    }
}
