//! Value hashing for storing secrets.

use sha2::{Digest, Sha512};

/// Hashes a value with SHA-512 and returns it as lowercase hex.
///
/// Deterministic, so equality checks against stored hashes work; the
/// output is always 128 hex characters.
#[must_use]
pub fn encrypt_value(value: &str) -> String {
    let digest = Sha512::digest(value.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(encrypt_value("secret"), encrypt_value("secret"));
        assert_ne!(encrypt_value("secret"), encrypt_value("Secret"));
    }

    #[test]
    fn test_output_shape() {
        let hashed = encrypt_value("anything");
        assert_eq!(hashed.len(), 128);
        assert!(hashed.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            encrypt_value("abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }
}
