use anyhow::Result;
use shared::Baby;
use sqlx::Row;

use crate::db::DbConnection;

/// Repository for baby profiles and their owner list
#[derive(Clone)]
pub struct BabyRepository {
    db: DbConnection,
}

impl BabyRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a baby and its owners in one transaction
    pub async fn store_baby(&self, baby: &Baby) -> Result<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO babies (id, name, birthdate, sex, active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&baby.id)
        .bind(&baby.name)
        .bind(baby.birthdate)
        .bind(&baby.sex)
        .bind(baby.active)
        .bind(baby.created_at)
        .bind(baby.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, parent_id) in baby.parent_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO baby_parents (baby_id, parent_id, position)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(&baby.id)
            .bind(parent_id)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get a baby by ID, owners in registration order
    pub async fn get_baby(&self, baby_id: &str) -> Result<Option<Baby>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birthdate, sex, active, created_at, updated_at
            FROM babies
            WHERE id = ?
            "#,
        )
        .bind(baby_id)
        .fetch_optional(self.db.pool())
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let owner_rows = sqlx::query(
            r#"
            SELECT parent_id
            FROM baby_parents
            WHERE baby_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(baby_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(Some(Baby {
            id: r.get("id"),
            name: r.get("name"),
            birthdate: r.get("birthdate"),
            sex: r.get("sex"),
            active: r.get("active"),
            parent_ids: owner_rows.iter().map(|o| o.get("parent_id")).collect(),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    async fn setup_test() -> BabyRepository {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        BabyRepository::new(db)
    }

    fn test_baby(id: &str, parent_ids: Vec<&str>) -> Baby {
        let now = Utc::now();
        Baby {
            id: id.to_string(),
            name: "Noa".to_string(),
            birthdate: NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date"),
            sex: Some("female".to_string()),
            active: true,
            parent_ids: parent_ids.into_iter().map(String::from).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_store_and_get_baby() {
        let repo = setup_test().await;
        let baby = test_baby("b1", vec!["p1", "p2"]);

        repo.store_baby(&baby).await.expect("Failed to store baby");

        let fetched = repo
            .get_baby("b1")
            .await
            .expect("Failed to get baby")
            .expect("Baby should exist");

        assert_eq!(fetched.name, "Noa");
        assert!(fetched.active);
        // Owner order follows registration order
        assert_eq!(fetched.parent_ids, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_store_baby_is_atomic() {
        let repo = setup_test().await;

        // The repeated owner violates the owner key after the baby row
        // is already written
        let result = repo.store_baby(&test_baby("b1", vec!["p1", "p1"])).await;
        assert!(result.is_err());

        // The half-written baby was rolled back
        let fetched = repo.get_baby("b1").await.expect("Query failed");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_get_nonexistent_baby() {
        let repo = setup_test().await;

        let fetched = repo.get_baby("missing").await.expect("Query failed");
        assert!(fetched.is_none());
    }
}
