use async_trait::async_trait;
use thiserror::Error;

use crate::database::connection::DatabaseManager;
use crate::database::models::{ensure_schema, NewProfile, Profile};
use crate::utils::logging::{log_database_error, log_database_operation};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only store for completed profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persists one profile and returns the identifier assigned by the store.
    async fn save(&self, profile: &NewProfile) -> Result<i64, PersistenceError>;
}

#[derive(Clone)]
pub struct SqliteProfileRepository {
    db: DatabaseManager,
}

impl SqliteProfileRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    async fn insert(&self, profile: &NewProfile) -> Result<i64, sqlx::Error> {
        ensure_schema(&self.db.pool).await?;
        Profile::create(&self.db.pool, profile).await
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn save(&self, profile: &NewProfile) -> Result<i64, PersistenceError> {
        match self.insert(profile).await {
            Ok(id) => {
                log_database_operation("INSERT", "users", Some(&format!("id={id}")));
                Ok(id)
            }
            Err(e) => {
                log_database_error(
                    "INSERT",
                    "users",
                    &e.to_string(),
                    Some(&format!("city={}", profile.city)),
                );
                Err(e.into())
            }
        }
    }
}
