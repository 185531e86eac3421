use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Cost factor used for newly created hashes. Verification accepts any cost
/// embedded in a stored hash, so this can change without invalidating
/// existing credentials.
pub const DEFAULT_HASH_COST: u32 = 12;

/// bcrypt silently ignores input past this many bytes.
const BCRYPT_MAX_BYTES: usize = 72;

lazy_static! {
    // Algorithm tag, two-digit cost, 53-character salt+payload
    static ref BCRYPT_HASH_REGEX: Regex =
        Regex::new(r"^\$2[aby]\$\d{2}\$[./A-Za-z0-9]{53}$").unwrap();
}

/// Condenses plaintexts longer than bcrypt's input ceiling to a SHA-256 hex
/// digest so no byte of the password is silently dropped. The threshold is
/// measured in UTF-8 bytes, not characters. Shorter plaintexts pass through
/// untouched, keeping existing hashes verifiable.
fn condense_if_oversized(password: &str) -> Cow<'_, str> {
    if password.len() > BCRYPT_MAX_BYTES {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        Cow::Owned(hex::encode(hasher.finalize()))
    } else {
        Cow::Borrowed(password)
    }
}

/// Hashes a password with the default cost factor.
///
/// Each call embeds a fresh random salt, so hashing the same password twice
/// yields different strings. This runs the full bcrypt work factor and can
/// take tens of milliseconds; async callers should move it to a blocking
/// thread (e.g. `spawn_blocking`).
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_HASH_COST)
}

/// Hashes a password with an explicit cost factor (see `Config::hash_cost`).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    let processed = condense_if_oversized(password);
    Ok(bcrypt::hash(processed.as_bytes(), cost)?)
}

/// Verifies a password against a stored hash.
///
/// A wrong password is `Ok(false)`, not an error. `InvalidHashFormat` is
/// returned when the stored value does not look like a bcrypt hash, or when
/// bcrypt itself fails to decode it; the two cases are indistinguishable to
/// the caller. CPU-bound like `hash_password`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    if !BCRYPT_HASH_REGEX.is_match(stored_hash) {
        return Err(AppError::InvalidHashFormat);
    }
    let processed = condense_if_oversized(password);
    bcrypt::verify(processed.as_bytes(), stored_hash).map_err(|_| AppError::InvalidHashFormat)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost, to keep the suite fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password_with_cost(password, TEST_COST).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "same input";
        let first = hash_password_with_cost(password, TEST_COST).unwrap();
        let second = hash_password_with_cost(password, TEST_COST).unwrap();
        assert_ne!(first, second);
        assert!(verify_password(password, &first).unwrap());
        assert!(verify_password(password, &second).unwrap());
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hashed = hash_password_with_cost("", TEST_COST).unwrap();
        assert!(verify_password("", &hashed).unwrap());
        assert!(!verify_password("not empty", &hashed).unwrap());
    }

    #[test]
    fn test_condensation_boundary() {
        // Exactly at the ceiling: hashed as-is
        let at_limit = "a".repeat(72);
        let hashed = hash_password_with_cost(&at_limit, TEST_COST).unwrap();
        assert!(verify_password(&at_limit, &hashed).unwrap());

        // One byte over: condensed before hashing
        let over_limit = "a".repeat(73);
        let hashed = hash_password_with_cost(&over_limit, TEST_COST).unwrap();
        assert!(verify_password(&over_limit, &hashed).unwrap());
        assert!(!verify_password(&at_limit, &hashed).unwrap());
    }

    #[test]
    fn test_long_passwords_differ_past_72_bytes() {
        // Identical in the first 72 bytes, different after. Without
        // condensation bcrypt would treat these as the same password.
        let base = "x".repeat(72);
        let p1 = format!("{}suffix-one", base);
        let p2 = format!("{}suffix-two", base);

        let hashed = hash_password_with_cost(&p1, TEST_COST).unwrap();
        assert!(verify_password(&p1, &hashed).unwrap());
        assert!(!verify_password(&p2, &hashed).unwrap());
    }

    #[test]
    fn test_threshold_is_measured_in_bytes() {
        // 40 two-byte characters: 40 code points but 80 bytes, so this must
        // take the condensation path and still round-trip.
        let unicode = "é".repeat(40);
        assert!(unicode.len() > 72);
        let hashed = hash_password_with_cost(&unicode, TEST_COST).unwrap();
        assert!(verify_password(&unicode, &hashed).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        match verify_password("anything", "not-a-valid-hash") {
            Err(AppError::InvalidHashFormat) => {}
            other => panic!("expected InvalidHashFormat, got {:?}", other),
        }

        // Right shape prefix, wrong payload length
        match verify_password("anything", "$2b$12$tooshort") {
            Err(AppError::InvalidHashFormat) => {}
            other => panic!("expected InvalidHashFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_verification_accepts_any_cost() {
        let password = "portable password";
        let cheap = hash_password_with_cost(password, 4).unwrap();
        let pricier = hash_password_with_cost(password, 6).unwrap();
        assert!(verify_password(password, &cheap).unwrap());
        assert!(verify_password(password, &pricier).unwrap());
    }
}
