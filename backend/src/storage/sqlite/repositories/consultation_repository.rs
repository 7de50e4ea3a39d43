use anyhow::Result;
use shared::{Consultation, ConsultationStatus};
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for consultation records and the slot flip that creates them
#[derive(Clone)]
pub struct ConsultationRepository {
    db: DbConnection,
}

impl ConsultationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Atomically mark a slot booked and persist the consultation record.
    ///
    /// The update only matches an unbooked slot, so of two racing bookings
    /// exactly one flips the row. The loser gets `false` back and no record
    /// is written. Flip and insert share one transaction, so a booked slot
    /// always has its consultation.
    pub async fn book_slot(
        &self,
        consultation: &Consultation,
        start_time: &str,
        end_time: &str,
    ) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let flipped = sqlx::query(
            r#"
            UPDATE slots
            SET booked = 1, occupant_id = ?
            WHERE schedule_day_id = ? AND start_time = ? AND end_time = ? AND booked = 0
            "#,
        )
        .bind(&consultation.parent_id)
        .bind(&consultation.schedule_day_id)
        .bind(start_time)
        .bind(end_time)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if flipped == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO consultations
                (id, parent_id, baby_id, doctor_id, schedule_day_id, scheduled_at, status, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&consultation.id)
        .bind(&consultation.parent_id)
        .bind(&consultation.baby_id)
        .bind(&consultation.doctor_id)
        .bind(&consultation.schedule_day_id)
        .bind(consultation.scheduled_at)
        .bind(consultation.status.as_str())
        .bind(&consultation.notes)
        .bind(consultation.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Get a consultation by ID
    pub async fn get_consultation(&self, consultation_id: &str) -> Result<Option<Consultation>> {
        let row = sqlx::query(
            r#"
            SELECT id, parent_id, baby_id, doctor_id, schedule_day_id,
                   scheduled_at, status, notes, created_at
            FROM consultations
            WHERE id = ?
            "#,
        )
        .bind(consultation_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::consultation_from_row(&r)?)),
            None => Ok(None),
        }
    }

    /// List consultations for a baby, newest first
    pub async fn list_for_baby(&self, baby_id: &str) -> Result<Vec<Consultation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, parent_id, baby_id, doctor_id, schedule_day_id,
                   scheduled_at, status, notes, created_at
            FROM consultations
            WHERE baby_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(baby_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::consultation_from_row).collect()
    }

    fn consultation_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Consultation> {
        let status_text: String = row.get("status");
        let status = ConsultationStatus::parse(&status_text)
            .ok_or_else(|| anyhow::anyhow!("Unknown consultation status: {}", status_text))?;

        Ok(Consultation {
            id: row.get("id"),
            parent_id: row.get("parent_id"),
            baby_id: row.get("baby_id"),
            doctor_id: row.get("doctor_id"),
            schedule_day_id: row.get("schedule_day_id"),
            scheduled_at: row.get("scheduled_at"),
            status,
            notes: row.get("notes"),
            created_at: row.get("created_at"),
        })
    }
}
