//! User Registration Handler
//!
//! Creates a user with a hashed password and an empty wallet.

use sqlx::PgPool;

use crate::auth::password::hash_password_blocking;
use crate::error::AppError;
use crate::store::UserRepository;

use super::{RegisterUserCommand, RegisteredUser};

const DUPLICATE_USER: &str = "Email or name already exists.";

/// Handler for user registration
pub struct RegisterUserHandler {
    users: UserRepository,
}

impl RegisterUserHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Execute the register user command
    pub async fn execute(&self, command: RegisterUserCommand) -> Result<RegisteredUser, AppError> {
        if self
            .users
            .email_or_name_taken(&command.email, &command.name)
            .await?
        {
            return Err(AppError::Conflict(DUPLICATE_USER.to_string()));
        }

        let password_hash = hash_password_blocking(command.password).await?;

        // A concurrent registration can still win the race; the unique
        // constraints turn that into the same conflict.
        let user = self
            .users
            .insert(&command.email, &password_hash, &command.name)
            .await
            .map_err(|e| AppError::from_insert(e, DUPLICATE_USER))?;

        tracing::info!(user_id = user.id, name = %user.name, "User registered");

        Ok(user.into())
    }
}
