use chrono::{Datelike, Utc};
use tracing::info;
use uuid::Uuid;

use crate::domain::dates;
use crate::error::AppError;
use crate::storage::BabyRepository;
use shared::{Baby, CreateBabyRequest, Parent};

/// Service for managing baby profiles
#[derive(Clone)]
pub struct BabyService {
    babies: BabyRepository,
}

impl BabyService {
    pub fn new(babies: BabyRepository) -> Self {
        Self { babies }
    }

    /// Create a baby profile owned by the requesting parent
    pub async fn create_baby(
        &self,
        parent: &Parent,
        request: CreateBabyRequest,
    ) -> Result<Baby, AppError> {
        info!(
            "Creating baby: name={}, birthdate={}",
            request.name, request.birthdate
        );

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("baby name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(AppError::invalid_input(
                "baby name cannot exceed 100 characters",
            ));
        }

        let birthdate = dates::parse_date(request.birthdate.trim())?;
        if !(1900..=2100).contains(&birthdate.year()) {
            return Err(AppError::invalid_input(
                "birthdate year must be between 1900 and 2100",
            ));
        }

        let now = Utc::now();
        let baby = Baby {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            birthdate,
            sex: request
                .sex
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            active: true,
            parent_ids: vec![parent.id.clone()],
            created_at: now,
            updated_at: now,
        };
        self.babies.store_baby(&baby).await?;

        info!("Created baby {} for parent {}", baby.id, parent.id);

        Ok(baby)
    }

    /// Get a baby by ID
    pub async fn get_baby(&self, baby_id: &str) -> Result<Option<Baby>, AppError> {
        Ok(self.babies.get_baby(baby_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    async fn setup_test() -> BabyService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        BabyService::new(BabyRepository::new(db))
    }

    fn test_parent() -> Parent {
        Parent {
            id: "p1".to_string(),
            phone: "+15550001111".to_string(),
            name: "Sam".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_baby() {
        let service = setup_test().await;
        let parent = test_parent();

        let baby = service
            .create_baby(
                &parent,
                CreateBabyRequest {
                    name: "  Noa ".to_string(),
                    birthdate: "2025-03-10".to_string(),
                    sex: Some("Female".to_string()),
                },
            )
            .await
            .expect("Failed to create baby");

        assert_eq!(baby.name, "Noa");
        assert_eq!(baby.sex.as_deref(), Some("female"));
        assert!(baby.active);
        assert_eq!(baby.parent_ids, vec!["p1"]);

        let stored = service
            .get_baby(&baby.id)
            .await
            .expect("Failed to get baby")
            .expect("Baby should exist");
        assert_eq!(stored, baby);
    }

    #[tokio::test]
    async fn test_create_baby_validation() {
        let service = setup_test().await;
        let parent = test_parent();

        let empty_name = service
            .create_baby(
                &parent,
                CreateBabyRequest {
                    name: "   ".to_string(),
                    birthdate: "2025-03-10".to_string(),
                    sex: None,
                },
            )
            .await;
        assert!(matches!(empty_name, Err(AppError::InvalidInput(_))));

        let long_name = service
            .create_baby(
                &parent,
                CreateBabyRequest {
                    name: "x".repeat(101),
                    birthdate: "2025-03-10".to_string(),
                    sex: None,
                },
            )
            .await;
        assert!(matches!(long_name, Err(AppError::InvalidInput(_))));

        let bad_date = service
            .create_baby(
                &parent,
                CreateBabyRequest {
                    name: "Noa".to_string(),
                    birthdate: "last spring".to_string(),
                    sex: None,
                },
            )
            .await;
        assert!(matches!(bad_date, Err(AppError::InvalidInput(_))));

        let ancient = service
            .create_baby(
                &parent,
                CreateBabyRequest {
                    name: "Noa".to_string(),
                    birthdate: "1899-12-31".to_string(),
                    sex: None,
                },
            )
            .await;
        assert!(matches!(ancient, Err(AppError::InvalidInput(_))));
    }
}
