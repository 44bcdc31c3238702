//! MySQL implementation of the TokenRepository trait.
//!
//! Tokens live in the `auth_tokens` table. Uniqueness of `user_id` and
//! `token_key` is enforced by the schema; the repository only translates
//! violations into `DomainError::Conflict`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::token::AuthToken;
use tg_core::errors::DomainError;
use tg_core::repositories::TokenRepository;

use super::{map_sqlx_error, parse_uuid};

const TOKEN_COLUMNS: &str = "id, user_id, token_key, expiration_date, created_at, updated_at";

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AuthToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<AuthToken, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;
        let user_id: String = row.try_get("user_id").map_err(|e| get_err("user_id", e))?;

        Ok(AuthToken {
            id: parse_uuid("id", &id)?,
            user_id: parse_uuid("user_id", &user_id)?,
            key: row
                .try_get("token_key")
                .map_err(|e| get_err("token_key", e))?,
            expiration_date: row
                .try_get::<Option<DateTime<Utc>>, _>("expiration_date")
                .map_err(|e| get_err("expiration_date", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get_err("updated_at", e))?,
        })
    }

    async fn find_one(
        &self,
        column: &str,
        value: String,
    ) -> Result<Option<AuthToken>, DomainError> {
        let query = format!(
            "SELECT {} FROM auth_tokens WHERE {} = ? LIMIT 1",
            TOKEN_COLUMNS, column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn delete_without_expiration(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expiration_date IS NULL")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete tokens without expiration", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<AuthToken>, DomainError> {
        self.find_one("user_id", user_id.to_string()).await
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<AuthToken>, DomainError> {
        self.find_one("token_key", key.to_string()).await
    }

    async fn create(&self, token: AuthToken) -> Result<AuthToken, DomainError> {
        let query = r#"
            INSERT INTO auth_tokens (
                id, user_id, token_key, expiration_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.user_id.to_string())
            .bind(&token.key)
            .bind(token.expiration_date)
            .bind(token.created_at)
            .bind(token.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create token", e))?;

        Ok(token)
    }

    async fn rotate_key(
        &self,
        id: Uuid,
        previous_key: &str,
        new_key: &str,
        expiration_date: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE auth_tokens
            SET token_key = ?, expiration_date = ?, updated_at = ?
            WHERE id = ? AND token_key = ?
        "#;

        let result = sqlx::query(query)
            .bind(new_key)
            .bind(expiration_date)
            .bind(Utc::now())
            .bind(id.to_string())
            .bind(previous_key)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to rotate token", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_key(&self, key: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE token_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expiration_date < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete expired tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
