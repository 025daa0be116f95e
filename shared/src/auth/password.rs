//! # Password Hashing with bcrypt
//!
//! Secure password storage for admin-created user accounts (`CreateUser`).
//! The `admin-service` is the only caller: students and faculty never
//! submit a password to these services directly, since authentication
//! itself lives with the gateway.
//!
//! ## Cost Factor
//!
//! The cost factor is configurable via `AppConfig::bcrypt_cost` (default
//! `10`). Each unit increase roughly doubles hashing time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let hasher = PasswordHasher::new(config.bcrypt_cost);
//! let hash = hasher.hash("TempP@ssw0rd1")?;
//! assert!(hasher.verify("TempP@ssw0rd1", &hash)?);
//! ```

use crate::errors::ApiError;

/// bcrypt-backed password hasher, configured with a fixed cost factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Creates a hasher using the given cost factor (default 10).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a password for storage in `users.password_hash`.
    pub fn hash(&self, password: &str) -> Result<String, ApiError> {
        bcrypt::hash(password, self.cost).map_err(|e| ApiError::InternalError {
            message: format!("password hashing failed: {e}"),
        })
    }

    /// Verifies a password against a stored bcrypt hash.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, ApiError> {
        bcrypt::verify(password, hash).map_err(|e| ApiError::InternalError {
            message: format!("password hash is malformed: {e}"),
        })
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Generates a random temporary password for `CreateUser`/`ResetPassword`.
/// The plaintext is returned to the admin caller exactly once and never
/// persisted or logged.
///
/// Twelve characters drawn from an alphanumeric-plus-symbol set, enough
/// to satisfy typical password-strength policies without the service
/// needing to enforce one of its own — the password is never chosen by
/// the end user.
pub fn generate_temporary_password() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz23456789!@#$%";
    let mut rng = rand::thread_rng();
    (0..12)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_correct_password() {
        let hasher = PasswordHasher::new(4); // low cost for fast tests
        let password = "TempP@ssw0rd1";

        let hash = hasher.hash(password).unwrap();

        assert_ne!(hash, password);
        assert!(hasher.verify(password, &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("TempP@ssw0rd1").unwrap();

        assert!(!hasher.verify("WrongPassword1", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hasher = PasswordHasher::new(4);
        let password = "TempP@ssw0rd1";

        let hash1 = hasher.hash(password).unwrap();
        let hash2 = hasher.hash(password).unwrap();

        assert_ne!(hash1, hash2);
        assert!(hasher.verify(password, &hash1).unwrap());
        assert!(hasher.verify(password, &hash2).unwrap());
    }

    #[test]
    fn test_generate_temporary_password_length() {
        let password = generate_temporary_password();
        assert_eq!(password.len(), 12);
    }

    #[test]
    fn test_generate_temporary_password_is_random() {
        let a = generate_temporary_password();
        let b = generate_temporary_password();
        assert_ne!(a, b);
    }
}
