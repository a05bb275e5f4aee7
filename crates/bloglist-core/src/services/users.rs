//! Registration and login.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Minimum length of both username and password.
pub const MIN_CREDENTIAL_LEN: usize = 3;

const TOO_SHORT: &str = "username or password too short";
const NOT_UNIQUE: &str = "username must be unique";
const BAD_LOGIN: &str = "invalid username or password";

/// A successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new user with a hashed password and no blogs.
    pub async fn register(
        &self,
        username: String,
        name: Option<String>,
        password: &str,
    ) -> Result<User, DomainError> {
        if username.chars().count() < MIN_CREDENTIAL_LEN
            || password.chars().count() < MIN_CREDENTIAL_LEN
        {
            return Err(DomainError::Validation(TOO_SHORT.to_string()));
        }

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(DomainError::Validation(NOT_UNIQUE.to_string()));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        match self.users.insert(User::new(username, name, password_hash)).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                Ok(user)
            }
            // Lost a race with a concurrent registration of the same name.
            Err(RepoError::Constraint(_)) => Err(DomainError::Validation(NOT_UNIQUE.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    /// Check credentials and issue a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::Unauthorized(BAD_LOGIN.to_string()))?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::Unauthorized(BAD_LOGIN.to_string()));
        }

        let token = self
            .tokens
            .generate_token(user.id, &user.username)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(Session {
            token,
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }
}
