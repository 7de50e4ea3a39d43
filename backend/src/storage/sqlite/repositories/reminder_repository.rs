use anyhow::Result;
use shared::Reminder;
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for booking reminders
#[derive(Clone)]
pub struct ReminderRepository {
    db: DbConnection,
}

impl ReminderRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a reminder for a parent
    pub async fn store_reminder(&self, reminder: &Reminder) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders (id, parent_id, body, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&reminder.id)
        .bind(&reminder.parent_id)
        .bind(&reminder.body)
        .bind(reminder.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// List reminders for a parent, newest first
    pub async fn list_for_parent(&self, parent_id: &str) -> Result<Vec<Reminder>> {
        let rows = sqlx::query(
            r#"
            SELECT id, parent_id, body, created_at
            FROM reminders
            WHERE parent_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(parent_id)
        .fetch_all(self.db.pool())
        .await?;

        let reminders = rows
            .iter()
            .map(|row| Reminder {
                id: row.get("id"),
                parent_id: row.get("parent_id"),
                body: row.get("body"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(reminders)
    }
}
