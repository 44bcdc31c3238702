//! Password verification backed by bcrypt hashes

mod bcrypt_verifier;

pub use bcrypt_verifier::{hash_password, BcryptCredentialVerifier};
