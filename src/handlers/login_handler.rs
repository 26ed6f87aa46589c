//! Login Handler
//!
//! Exchanges `{email, password}` for a signed bearer token.

use sqlx::PgPool;

use crate::auth::password::verify_password_blocking;
use crate::auth::{AuthError, JwtKeys};
use crate::error::AppError;
use crate::store::UserRepository;

use super::{LoginCommand, LoginResult};

pub struct LoginHandler {
    users: UserRepository,
    keys: JwtKeys,
}

impl LoginHandler {
    pub fn new(pool: PgPool, keys: JwtKeys) -> Self {
        Self {
            users: UserRepository::new(pool),
            keys,
        }
    }

    pub async fn execute(&self, command: LoginCommand) -> Result<LoginResult, AppError> {
        // Unknown email and wrong password produce the same error.
        let user = self
            .users
            .find_by_email(&command.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password_blocking(command.password, user.password.clone()).await? {
            tracing::warn!(user_id = user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.keys.issue(user.id, &user.email, &user.name)?;

        tracing::info!(user_id = user.id, "Bearer token issued");

        Ok(LoginResult { token })
    }
}
