use anyhow::Result;
use shared::{Vaccination, VaccinationStatus};
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for vaccination appointments
#[derive(Clone)]
pub struct VaccinationRepository {
    db: DbConnection,
}

impl VaccinationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a vaccination appointment
    pub async fn store_vaccination(&self, vaccination: &Vaccination) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vaccinations
                (id, parent_id, baby_id, vaccine, due_date, status, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vaccination.id)
        .bind(&vaccination.parent_id)
        .bind(&vaccination.baby_id)
        .bind(&vaccination.vaccine)
        .bind(vaccination.due_date)
        .bind(vaccination.status.as_str())
        .bind(&vaccination.notes)
        .bind(vaccination.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// List vaccinations for a baby ordered by due date
    pub async fn list_for_baby(&self, baby_id: &str) -> Result<Vec<Vaccination>> {
        let rows = sqlx::query(
            r#"
            SELECT id, parent_id, baby_id, vaccine, due_date, status, notes, created_at
            FROM vaccinations
            WHERE baby_id = ?
            ORDER BY due_date ASC
            "#,
        )
        .bind(baby_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                let status_text: String = row.get("status");
                let status = VaccinationStatus::parse(&status_text).ok_or_else(|| {
                    anyhow::anyhow!("Unknown vaccination status: {}", status_text)
                })?;
                Ok(Vaccination {
                    id: row.get("id"),
                    parent_id: row.get("parent_id"),
                    baby_id: row.get("baby_id"),
                    vaccine: row.get("vaccine"),
                    due_date: row.get("due_date"),
                    status,
                    notes: row.get("notes"),
                    created_at: row.get("created_at"),
                })
            })
            .collect()
    }
}
