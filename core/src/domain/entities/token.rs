//! Token entity for bearer-key session authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token lifetime (30 days)
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 30;

/// Session token stored in the database
///
/// A user owns at most one token and every key is globally unique; both are
/// enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Unique identifier for the token row
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// Opaque bearer credential
    pub key: String,

    /// Instant after which the token is invalid; `None` marks a malformed row
    pub expiration_date: Option<DateTime<Utc>>,

    /// Timestamp when the token row was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last rotation
    pub updated_at: DateTime<Utc>,
}

impl AuthToken {
    /// Creates a token for `user_id` expiring `lifetime` from now
    pub fn issue(user_id: Uuid, key: String, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            key,
            expiration_date: Some(now + lifetime),
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the token is expired at `now`
    ///
    /// A token without an expiration date is never valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiration_date {
            Some(expiration) => expiration < now,
            None => true,
        }
    }

    /// Checks whether the token is expired right now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Outcome of issuing a token for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIssue {
    /// The live key for the user
    pub key: String,

    /// A new row was inserted
    pub created: bool,

    /// An expired row was renewed in place
    pub renewed: bool,
}

impl TokenIssue {
    pub fn created(key: String) -> Self {
        Self {
            key,
            created: true,
            renewed: false,
        }
    }

    pub fn existing(key: String) -> Self {
        Self {
            key,
            created: false,
            renewed: false,
        }
    }

    pub fn renewed(key: String) -> Self {
        Self {
            key,
            created: false,
            renewed: true,
        }
    }
}
