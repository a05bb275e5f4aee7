//! Argon2id hashing for account passwords.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use bloglist_core::ports::{AuthError, PasswordService};

/// Stores passwords as PHC strings (`$argon2id$...`), never in clear text.
#[derive(Default)]
pub struct Argon2PasswordService {
    hasher: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

fn hashing_error(e: password_hash::Error) -> AuthError {
    AuthError::HashingError(e.to_string())
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .hasher
            .hash_password(password.as_bytes(), &salt)
            .map_err(hashing_error)?;

        Ok(phc.to_string())
    }

    /// `Ok(false)` only for a wrong password. An unreadable stored hash is an error.
    fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        let stored = PasswordHash::new(stored).map_err(hashing_error)?;

        match self.hasher.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => {
                tracing::error!("Stored password hash could not be checked: {}", e);
                Err(hashing_error(e))
            }
        }
    }
}
