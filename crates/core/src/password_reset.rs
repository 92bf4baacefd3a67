//! Single-use password reset tokens.
//!
//! The plaintext token is only ever emailed to the user; the database
//! stores its SHA-256 hex digest. Every unusable-token case (unknown,
//! already used, expired) maps to the same [`INVALID_TOKEN_MESSAGE`].

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Token lifetime.
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Minimum length of a new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The one message returned for every rejected token.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired reset token";

/// Generate a random 256-bit token, hex encoded (64 chars).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 hex digest of a token, as stored in `password_reset_tokens`.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Expiry instant for a token issued at `issued_at`.
pub fn expires_at(issued_at: Timestamp) -> Timestamp {
    issued_at + chrono::Duration::minutes(TOKEN_TTL_MINUTES)
}

/// Check that a stored token may still be redeemed.
pub fn check_token_usable(
    expires_at: Timestamp,
    used_at: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), CoreError> {
    if used_at.is_some() || expires_at <= now {
        return Err(invalid_token());
    }
    Ok(())
}

/// The generic rejection used for unknown, used and expired tokens alike.
pub fn invalid_token() -> CoreError {
    CoreError::Validation(INVALID_TOKEN_MESSAGE.to_string())
}

/// Validate a new password's length.
pub fn validate_new_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn generated_tokens_are_unique_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_is_stable_sha256() {
        let token = "abc";
        assert_eq!(hash_token(token), hash_token(token));
        assert_eq!(
            hash_token(token),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn expired_and_used_tokens_share_one_error() {
        let now = Utc::now();
        let expired = check_token_usable(now - chrono::Duration::minutes(1), None, now)
            .unwrap_err()
            .to_string();
        let used = check_token_usable(
            now + chrono::Duration::minutes(30),
            Some(now - chrono::Duration::minutes(5)),
            now,
        )
        .unwrap_err()
        .to_string();
        let unknown = invalid_token().to_string();

        assert_eq!(expired, used);
        assert_eq!(used, unknown);
    }

    #[test]
    fn fresh_token_is_usable() {
        let now = Utc::now();
        assert!(check_token_usable(expires_at(now), None, now).is_ok());
    }

    #[test]
    fn password_length() {
        assert!(validate_new_password("12345").is_err());
        assert!(validate_new_password("123456").is_ok());
    }
}
