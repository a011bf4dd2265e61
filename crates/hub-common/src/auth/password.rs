//! Password hashing and the admin credential store
//!
//! Uses Argon2id for password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::AdminConfig;
use crate::error::AppError;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is not a valid PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// The single admin account allowed to open a session
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Option<String>,
}

impl AdminCredentials {
    /// Resolve the configured credentials, hashing a plain password once
    ///
    /// # Errors
    /// Returns an error if the configured hash is malformed or hashing fails
    pub fn from_config(config: &AdminConfig) -> Result<Self, AppError> {
        let password_hash = match (&config.password_hash, &config.password) {
            (Some(hash), _) => {
                PasswordHash::new(hash).map_err(|e| {
                    AppError::Config(format!("ADMIN_PASSWORD_HASH is not a valid hash: {e}"))
                })?;
                Some(hash.clone())
            }
            (None, Some(password)) => Some(hash_password(password)?),
            (None, None) => None,
        };

        Ok(Self {
            username: config.username.clone(),
            password_hash,
        })
    }

    /// Check if an admin login is possible at all
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.password_hash.is_some()
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Verify a login attempt
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` on any mismatch or when no
    /// admin password is configured
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AppError> {
        let Some(hash) = &self.password_hash else {
            return Err(AppError::InvalidCredentials);
        };

        // Verify even on a wrong username so both paths cost the same
        let password_ok = verify_password(password, hash)?;
        if password_ok && username == self.username {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
