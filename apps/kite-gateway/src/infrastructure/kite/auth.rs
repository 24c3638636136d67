//! Session checksum for the Kite token exchange.

use sha2::{Digest, Sha256};

/// Checksum proving possession of the API secret.
///
/// `hex(SHA256(api_key + request_token + api_secret))`
#[must_use]
pub fn session_checksum(api_key: &str, request_token: &str, api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hasher.update(request_token.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_matches_concatenated_digest() {
        let checksum = session_checksum("key", "tok123", "secret");
        let expected = hex::encode(Sha256::digest(b"keytok123secret"));
        assert_eq!(checksum, expected);
    }

    #[test]
    fn checksum_of_empty_input() {
        assert_eq!(
            session_checksum("", "", ""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn checksum_is_lowercase_hex() {
        let checksum = session_checksum("a", "b", "c");
        assert_eq!(checksum.len(), 64);
        assert!(
            checksum
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }
}
