use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::Parent;
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for OTP codes, parent accounts and session tokens
#[derive(Clone)]
pub struct AuthRepository {
    db: DbConnection,
}

impl AuthRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store an OTP code for a phone, replacing any pending one
    pub async fn store_otp(
        &self,
        phone: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO otp_codes (phone, code, expires_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(phone)
        .bind(code)
        .bind(expires_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get the pending OTP code and its expiry for a phone
    pub async fn get_otp(&self, phone: &str) -> Result<Option<(String, DateTime<Utc>)>> {
        let row = sqlx::query(
            r#"
            SELECT code, expires_at
            FROM otp_codes
            WHERE phone = ?
            "#,
        )
        .bind(phone)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some((r.get("code"), r.get("expires_at")))),
            None => Ok(None),
        }
    }

    /// Delete the pending OTP code for a phone
    pub async fn delete_otp(&self, phone: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM otp_codes WHERE phone = ?
            "#,
        )
        .bind(phone)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Consume the pending OTP code if it still matches.
    ///
    /// The delete only matches the exact (phone, code) row, so of two racing
    /// verifications exactly one gets `true` back.
    pub async fn consume_otp(&self, phone: &str, code: &str) -> Result<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM otp_codes WHERE phone = ? AND code = ?
            "#,
        )
        .bind(phone)
        .bind(code)
        .execute(self.db.pool())
        .await?
        .rows_affected();
        Ok(deleted == 1)
    }

    /// Store a parent account
    pub async fn store_parent(&self, parent: &Parent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO parents (id, phone, name, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&parent.id)
        .bind(&parent.phone)
        .bind(&parent.name)
        .bind(parent.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a parent by verified phone number
    pub async fn get_parent_by_phone(&self, phone: &str) -> Result<Option<Parent>> {
        let row = sqlx::query(
            r#"
            SELECT id, phone, name, created_at
            FROM parents
            WHERE phone = ?
            "#,
        )
        .bind(phone)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Parent {
                id: r.get("id"),
                phone: r.get("phone"),
                name: r.get("name"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }

    /// Store a session token for a parent
    pub async fn store_session(
        &self,
        token: &str,
        parent_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, parent_id, created_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(token)
        .bind(parent_id)
        .bind(created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Resolve a session token to the parent that owns it
    pub async fn get_session_parent(&self, token: &str) -> Result<Option<Parent>> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.phone, p.name, p.created_at
            FROM sessions s
            JOIN parents p ON p.id = s.parent_id
            WHERE s.token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Parent {
                id: r.get("id"),
                phone: r.get("phone"),
                name: r.get("name"),
                created_at: r.get("created_at"),
            })),
            None => Ok(None),
        }
    }
}
