//! Token key generation

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

/// Generates a bearer key
///
/// `length` symbols drawn uniformly from `[A-Za-z0-9]` using the operating
/// system's CSPRNG, followed by the current Unix timestamp in seconds.
/// Uniqueness is guaranteed by the store, not here.
pub fn generate_token_key(length: usize) -> String {
    let random: String = OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();

    format!("{}{}", random, Utc::now().timestamp())
}

/// Shortens a key for log output
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(6).collect();
    format!("{}***", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_shape() {
        let before = Utc::now().timestamp();
        let key = generate_token_key(32);
        let after = Utc::now().timestamp();

        let (random, timestamp) = key.split_at(32);
        assert!(random.chars().all(|c| c.is_ascii_alphanumeric()));

        let timestamp: i64 = timestamp.parse().unwrap();
        assert!(timestamp >= before && timestamp <= after);
    }

    #[test]
    fn test_custom_length() {
        let key = generate_token_key(8);
        assert!(key[..8].chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(key[8..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_keys_differ() {
        let keys: HashSet<String> = (0..100).map(|_| generate_token_key(32)).collect();
        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_alphabet_coverage() {
        let symbols: HashSet<char> = (0..200)
            .flat_map(|_| generate_token_key(32).chars().take(32).collect::<Vec<_>>())
            .collect();

        assert!(symbols.iter().all(|c| c.is_ascii_alphanumeric()));
        assert!(symbols.iter().any(|c| c.is_ascii_lowercase()));
        assert!(symbols.iter().any(|c| c.is_ascii_uppercase()));
        assert!(symbols.iter().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("abcdefghijkl"), "abcdef***");
        assert_eq!(mask_key("abc"), "abc***");
    }
}
