//! Hashing and random token helpers for sessions, OAuth state and PKCE.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{Rng, RngCore};
use sha2::{Digest, Sha256};

const ALPHANUMERIC_UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates `num_bytes` of OS-seeded randomness, base64url encoded without
/// padding. Used for session tokens, OAuth state and PKCE verifiers.
pub fn generate_token(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Derives the S256 PKCE code challenge for a verifier.
pub fn pkce_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// Generates a short upper-case code without ambiguous characters
/// (no `0`, `O`, `1`, `I`). Used for human-readable order numbers.
pub fn generate_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHANUMERIC_UPPER.len());
            ALPHANUMERIC_UPPER[idx] as char
        })
        .collect()
}

/// Compares two strings in constant time with respect to their contents.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex("test"),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_generate_token_length_and_alphabet() {
        let token = generate_token(32);
        // 32 bytes -> 43 base64url chars without padding
        assert_eq!(token.len(), 43);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generate_token_unique() {
        assert_ne!(generate_token(32), generate_token(32));
    }

    #[test]
    fn test_pkce_challenge_rfc7636_vector() {
        // RFC 7636 Appendix B
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            pkce_challenge(verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }

    #[test]
    fn test_generate_code() {
        let code = generate_code(6);
        assert_eq!(code.len(), 6);
        assert!(code.bytes().all(|b| ALPHANUMERIC_UPPER.contains(&b)));
        assert!(!code.contains('O') && !code.contains('0'));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("state-abc", "state-abc"));
        assert!(!constant_time_eq("state-abc", "state-abd"));
        assert!(!constant_time_eq("short", "longer"));
        assert!(constant_time_eq("", ""));
    }
}
