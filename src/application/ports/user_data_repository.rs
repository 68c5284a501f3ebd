use async_trait::async_trait;
use serde_json::Value;

use crate::domain::UserDataRecord;

/// Whether a save created a new row or replaced an existing one. Reported
/// back to the caller on every save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

impl SaveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaveOutcome::Inserted => "insert",
            SaveOutcome::Updated => "update",
        }
    }
}

#[async_trait]
pub trait UserDataRepository: Send + Sync {
    /// Upsert by (email, serial).
    async fn save(
        &self,
        email: &str,
        serial: i32,
        data: &Value,
    ) -> Result<SaveOutcome, RepositoryError>;

    /// All records for the email, ordered by serial ascending.
    async fn find_by_email(&self, email: &str) -> Result<Vec<UserDataRecord>, RepositoryError>;

    /// `NotFound` when the composite key does not exist.
    async fn delete(&self, email: &str, serial: i32) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("query failed: {0}")]
    QueryFailed(String),
}
