//! Authentication service module
//!
//! Login by password, logout and current-user resolution on top of the
//! token service.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
