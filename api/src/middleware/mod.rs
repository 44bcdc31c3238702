pub mod auth;

pub use auth::{extract_token_key, AuthContext, SessionResolver, TokenAuth};
