//! Cryptographic utilities for session token hashing and signed download URLs.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Computes SHA-256 hash of the input and returns it as a hex string.
///
/// Session tokens are stored hashed so a database leak does not expose
/// usable credentials.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signs a download grant for a private storage object.
///
/// The signed message is `{bucket}/{object_key}|{expires_unix}`. The
/// signature is returned as a hex string suitable for a query parameter.
pub fn sign_download(secret: &str, bucket: &str, object_key: &str, expires_unix: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(download_message(bucket, object_key, expires_unix).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a download signature in constant time.
///
/// Returns `false` for malformed hex as well as for a mismatched
/// signature. Expiry is checked by the caller against the clock.
pub fn verify_download(
    secret: &str,
    bucket: &str,
    object_key: &str,
    expires_unix: i64,
    signature: &str,
) -> bool {
    let decoded = match hex::decode(signature) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(download_message(bucket, object_key, expires_unix).as_bytes());
    mac.verify_slice(&decoded).is_ok()
}

fn download_message(bucket: &str, object_key: &str, expires_unix: i64) -> String {
    format!("{}/{}|{}", bucket, object_key, expires_unix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_value() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        assert_eq!(sha256_hex("same token"), sha256_hex("same token"));
    }

    #[test]
    fn test_sha256_hex_distinct_inputs() {
        assert_ne!(sha256_hex("token-a"), sha256_hex("token-b"));
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sign_and_verify_download() {
        let sig = sign_download("secret", "documents", "user/123.pdf", 1_900_000_000);
        assert!(verify_download(
            "secret",
            "documents",
            "user/123.pdf",
            1_900_000_000,
            &sig
        ));
    }

    #[test]
    fn test_verify_download_rejects_wrong_secret() {
        let sig = sign_download("secret", "documents", "user/123.pdf", 1_900_000_000);
        assert!(!verify_download(
            "other-secret",
            "documents",
            "user/123.pdf",
            1_900_000_000,
            &sig
        ));
    }

    #[test]
    fn test_verify_download_rejects_tampered_path() {
        let sig = sign_download("secret", "documents", "user/123.pdf", 1_900_000_000);
        assert!(!verify_download(
            "secret",
            "documents",
            "other/456.pdf",
            1_900_000_000,
            &sig
        ));
    }

    #[test]
    fn test_verify_download_rejects_tampered_expiry() {
        let sig = sign_download("secret", "documents", "user/123.pdf", 1_900_000_000);
        assert!(!verify_download(
            "secret",
            "documents",
            "user/123.pdf",
            1_900_000_001,
            &sig
        ));
    }

    #[test]
    fn test_verify_download_rejects_invalid_hex() {
        assert!(!verify_download(
            "secret",
            "documents",
            "user/123.pdf",
            1_900_000_000,
            "not hex at all"
        ));
    }

    #[test]
    fn test_signature_is_hex_of_expected_length() {
        let sig = sign_download("secret", "images", "a.png", 0);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_bucket_is_part_of_signed_message() {
        let sig = sign_download("secret", "documents", "a.pdf", 100);
        assert!(!verify_download("secret", "assignments", "a.pdf", 100, &sig));
    }
}
