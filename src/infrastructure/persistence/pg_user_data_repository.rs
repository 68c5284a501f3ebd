use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{RepositoryError, SaveOutcome, UserDataRepository};
use crate::domain::UserDataRecord;

pub struct PgUserDataRepository {
    pool: PgPool,
}

impl PgUserDataRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserDataRow {
    email: String,
    serial: i32,
    data: Value,
    updated_at: DateTime<Utc>,
}

impl From<UserDataRow> for UserDataRecord {
    fn from(row: UserDataRow) -> Self {
        Self {
            email: row.email,
            serial: row.serial,
            data: row.data,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserDataRepository for PgUserDataRepository {
    #[instrument(skip(self, data), fields(email = %email, serial = serial))]
    async fn save(
        &self,
        email: &str,
        serial: i32,
        data: &Value,
    ) -> Result<SaveOutcome, RepositoryError> {
        let existing: Option<i32> =
            sqlx::query_scalar("SELECT serial FROM user_data WHERE email = $1 AND serial = $2")
                .bind(email)
                .bind(serial)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO user_data (email, serial, data, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email, serial)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(email)
        .bind(serial)
        .bind(data)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(if existing.is_some() {
            SaveOutcome::Updated
        } else {
            SaveOutcome::Inserted
        })
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn find_by_email(&self, email: &str) -> Result<Vec<UserDataRecord>, RepositoryError> {
        let rows: Vec<UserDataRow> = sqlx::query_as(
            r#"
            SELECT email, serial, data, updated_at
            FROM user_data
            WHERE email = $1
            ORDER BY serial ASC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(rows.into_iter().map(UserDataRecord::from).collect())
    }

    #[instrument(skip(self), fields(email = %email, serial = serial))]
    async fn delete(&self, email: &str, serial: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM user_data WHERE email = $1 AND serial = $2")
            .bind(email)
            .bind(serial)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
