//! Admin credential tools.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use thiserror::Error;

/// Errors that can occur while hashing.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Hashing error: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Hash a password with a fresh random salt and print the PHC string.
///
/// The output goes into `ADMIN_PASSWORD_HASH` for the admin binary.
///
/// # Errors
///
/// Returns `HashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<(), HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(HashError::Hash)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{hash}");
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn test_hash_verifies_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"dk-weight-4ply", &salt)
            .unwrap()
            .to_string();

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"dk-weight-4ply", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong-password", &parsed)
                .is_err()
        );
    }
}
