//! User entity representing an account that can log in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account as seen by the token service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login name, matched exactly and case-sensitively
    pub login: String,

    /// Stored password hash, only ever handed to a credential verifier
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Display name
    pub name: Option<String>,

    /// Archived users cannot log in
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            login: login.into(),
            password_hash: password_hash.into(),
            name: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Archives the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
