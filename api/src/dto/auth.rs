use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use tg_core::domain::entities::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name, matched exactly as stored
    #[validate(length(min = 1, max = 255))]
    pub login: String,

    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: Uuid,
    pub login: String,
    pub name: Option<String>,
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            name: user.name,
        }
    }
}
