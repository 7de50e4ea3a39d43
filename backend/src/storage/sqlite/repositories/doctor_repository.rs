use anyhow::Result;
use shared::Doctor;
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for doctor profiles
#[derive(Clone)]
pub struct DoctorRepository {
    db: DbConnection,
}

impl DoctorRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a doctor in the database
    pub async fn store_doctor(&self, doctor: &Doctor) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO doctors (id, name, specialty, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&doctor.id)
        .bind(&doctor.name)
        .bind(&doctor.specialty)
        .bind(doctor.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a doctor by ID
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Option<Doctor>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, specialty, created_at
            FROM doctors
            WHERE id = ?
            "#,
        )
        .bind(doctor_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Doctor {
                id: r.get("id"),
                name: r.get("name"),
                specialty: r.get("specialty"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }
}
