//! Top-up Handler
//!
//! Adds funds to a single wallet. No counterparty, no ledger row.

use sqlx::PgPool;

use crate::domain::{Amount, AmountError, OperationContext};
use crate::error::AppError;
use crate::store::UserRepository;

use super::{TopUpCommand, TopUpResult};

pub struct TopUpHandler {
    users: UserRepository,
}

impl TopUpHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    pub async fn execute(
        &self,
        command: TopUpCommand,
        context: &OperationContext,
    ) -> Result<TopUpResult, AppError> {
        let amount = Amount::new(command.amount).map_err(|e| match e {
            AmountError::NotPositive(_) => {
                AppError::BadRequest("Amount must be greater than zero".to_string())
            }
            other => other.into(),
        })?;

        let wallet = self
            .users
            .add_to_wallet(command.user_id, &amount)
            .await
            .map_err(AppError::from_wallet_write)?
            .ok_or(AppError::UserNotFound(command.user_id))?;

        tracing::info!(
            user_id = command.user_id,
            amount = %amount,
            wallet = %wallet,
            correlation_id = ?context.correlation_id,
            "Wallet topped up"
        );

        Ok(TopUpResult {
            status: "success".to_string(),
            message: format!("Top up to wallet with id {} success", command.user_id),
        })
    }
}
