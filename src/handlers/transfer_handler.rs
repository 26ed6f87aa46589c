//! Transfer Handler
//!
//! Applies a lending (BORROW) or repayment (REPAY) across two wallets and
//! appends the ledger row, all in one database transaction.

use sqlx::PgPool;

use crate::domain::{plan_transfer, Amount, DomainError, OperationContext, TransactionType, Wallet};
use crate::error::AppError;
use crate::store::{LedgerRepository, UserRepository};

use super::{TransferCommand, TransferResult};

/// Handler for lending and repayment transfers
pub struct TransferHandler {
    pool: PgPool,
}

impl TransferHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the transfer command
    pub async fn execute(
        &self,
        command: TransferCommand,
        context: &OperationContext,
    ) -> Result<TransferResult, AppError> {
        if command.lender_id == command.borrower_id {
            return Err(DomainError::SameParty.into());
        }

        let amount = Amount::new(command.amount)?;

        let mut tx = self.pool.begin().await?;

        // Both rows stay locked until commit or rollback.
        let locked =
            UserRepository::lock_wallets(&mut tx, &[command.lender_id, command.borrower_id]).await?;
        let wallet_of = |id: i64| {
            locked
                .iter()
                .find(|(row_id, _)| *row_id == id)
                .map(|(_, wallet)| Wallet::new(*wallet))
        };

        let lender_wallet =
            wallet_of(command.lender_id).ok_or(AppError::LenderNotFound(command.lender_id))?;
        let borrower_wallet =
            wallet_of(command.borrower_id).ok_or(AppError::BorrowerNotFound(command.borrower_id))?;

        let kind: TransactionType = command.kind.parse()?;

        let plan = match plan_transfer(kind, lender_wallet, borrower_wallet, &amount) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!(
                    lender_id = command.lender_id,
                    borrower_id = command.borrower_id,
                    amount = %amount,
                    kind = %kind,
                    correlation_id = ?context.correlation_id,
                    "Transfer rejected: {}",
                    e
                );
                // Dropping `tx` rolls back and releases the locks.
                return Err(e.into());
            }
        };

        UserRepository::set_wallet(&mut tx, command.lender_id, plan.lender_wallet)
            .await
            .map_err(AppError::from_wallet_write)?;
        UserRepository::set_wallet(&mut tx, command.borrower_id, plan.borrower_wallet)
            .await
            .map_err(AppError::from_wallet_write)?;

        let record =
            LedgerRepository::append(&mut tx, command.lender_id, command.borrower_id, &amount, kind)
                .await?;

        tx.commit().await?;

        tracing::info!(
            transaction_id = record.id,
            lender_id = record.lender_id,
            borrower_id = record.borrower_id,
            amount = %amount,
            kind = %kind,
            request_user_id = ?context.request_user_id,
            correlation_id = ?context.correlation_id,
            "Transfer recorded"
        );

        Ok(record.into())
    }
}
