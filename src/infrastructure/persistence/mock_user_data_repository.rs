use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::application::ports::{RepositoryError, SaveOutcome, UserDataRepository};
use crate::domain::UserDataRecord;

/// In-memory repository for tests. BTreeMap keeps records ordered by
/// (email, serial) so lookups come back serial-ascending like the real
/// store.
#[derive(Default)]
pub struct MockUserDataRepository {
    records: Mutex<BTreeMap<(String, i32), Value>>,
}

impl MockUserDataRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDataRepository for MockUserDataRepository {
    async fn save(
        &self,
        email: &str,
        serial: i32,
        data: &Value,
    ) -> Result<SaveOutcome, RepositoryError> {
        let mut records = self.records.lock().expect("mock repository poisoned");
        let previous = records.insert((email.to_string(), serial), data.clone());
        Ok(if previous.is_some() {
            SaveOutcome::Updated
        } else {
            SaveOutcome::Inserted
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<UserDataRecord>, RepositoryError> {
        let records = self.records.lock().expect("mock repository poisoned");
        Ok(records
            .iter()
            .filter(|((e, _), _)| e == email)
            .map(|((e, serial), data)| UserDataRecord {
                email: e.clone(),
                serial: *serial,
                data: data.clone(),
                updated_at: Utc::now(),
            })
            .collect())
    }

    async fn delete(&self, email: &str, serial: i32) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("mock repository poisoned");
        records
            .remove(&(email.to_string(), serial))
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
