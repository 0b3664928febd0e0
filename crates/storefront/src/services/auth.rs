//! Email and password authentication.
//!
//! Passwords are stored as argon2id hashes. Sign-in failures for an unknown
//! email and for a wrong password both map to [`AuthError::InvalidCredentials`]
//! so the API does not reveal which of the two it was.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use doorbuster_core::UserId;

use crate::db::{AdminUserRepository, RepositoryError, UserRepository};
use crate::models::CurrentUser;

const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    UserAlreadyExists,

    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("password hashing failed")]
    Hash,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Sign-up, sign-in, and password changes against the `users` table.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an account and return the session representation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmail` or `WeakPassword` for rejected input,
    /// `UserAlreadyExists` for a duplicate email, and `Repository` for
    /// database failures.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = normalize_email(email)?;
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let hash = hash_password(password)?;
        let user = UserRepository::new(&self.pool)
            .create(&email, &hash)
            .await
            .map_err(|err| {
                if err.is_unique_violation() {
                    AuthError::UserAlreadyExists
                } else {
                    AuthError::Repository(err)
                }
            })?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            is_admin: false,
        })
    }

    /// Verify credentials and return the session representation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the email is unknown or the
    /// password does not match.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<CurrentUser, AuthError> {
        let email = normalize_email(email)?;
        let Some(user) = UserRepository::new(&self.pool).get_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let is_admin = AdminUserRepository::new(&self.pool).is_admin(user.id).await?;

        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            is_admin,
        })
    }

    /// Change a password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if the current password does not match
    /// or the user no longer exists, `WeakPassword` for a short replacement.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn update_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword);
        }

        let repo = UserRepository::new(&self.pool);
        let Some(user) = repo.get_by_id(user_id).await? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(current_password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let hash = hash_password(new_password)?;
        repo.update_password_hash(user_id, &hash).await?;
        Ok(())
    }
}

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_ascii_lowercase();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AuthError::InvalidEmail);
    }
    Ok(email)
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::Hash)
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(verify_password("hunter2hunter2", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not a phc string"));
    }

    #[test]
    fn email_normalization() {
        assert_eq!(
            normalize_email("  Shopper@Example.COM ").unwrap(),
            "shopper@example.com"
        );
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("user@").is_err());
        assert!(normalize_email("user@nodot").is_err());
    }
}
