//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::user::User;
use tg_core::errors::DomainError;
use tg_core::repositories::UserRepository;

use super::{map_sqlx_error, parse_uuid};

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a user row
    ///
    /// Accounts are provisioned outside the login flow; this is used by
    /// seeding scripts and database tests.
    pub async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO users (
                id, login, password_hash, name, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.login)
            .bind(&user.password_hash)
            .bind(&user.name)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create user", e))?;

        Ok(())
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;

        Ok(User {
            id: parse_uuid("id", &id)?,
            login: row.try_get("login").map_err(|e| get_err("login", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| get_err("password_hash", e))?,
            name: row.try_get("name").map_err(|e| get_err("name", e))?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| get_err("is_active", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get_err("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        // The login column uses a binary collation, so `=` is case-sensitive.
        let query = r#"
            SELECT id, login, password_hash, name, is_active, created_at, updated_at
            FROM users
            WHERE login = ? AND is_active = TRUE
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user by login", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, login, password_hash, name, is_active, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}
