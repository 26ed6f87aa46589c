//! Lending rules
//!
//! The balance arithmetic for a single BORROW or REPAY transfer, kept free of
//! persistence so the handler only has to load, apply and store.

use super::{Amount, DomainError, Party, TransactionType, Wallet};

/// Wallet balances after a transfer has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub lender_wallet: Wallet,
    pub borrower_wallet: Wallet,
}

/// Compute the new lender and borrower wallets for a transfer.
///
/// - `BORROW`: the lender must cover `amount`; lender pays, borrower receives.
/// - `REPAY`: the borrower must cover `amount`; borrower pays, lender receives.
///
/// # Errors
/// `DomainError::InsufficientFunds` naming the paying party.
pub fn plan_transfer(
    kind: TransactionType,
    lender_wallet: Wallet,
    borrower_wallet: Wallet,
    amount: &Amount,
) -> Result<TransferPlan, DomainError> {
    match kind {
        TransactionType::Borrow => {
            if !lender_wallet.covers(amount) {
                return Err(DomainError::insufficient_funds(
                    Party::Lender,
                    amount.value(),
                    lender_wallet.value(),
                ));
            }
            Ok(TransferPlan {
                lender_wallet: lender_wallet.debit(amount),
                borrower_wallet: borrower_wallet.credit(amount),
            })
        }
        TransactionType::Repay => {
            if !borrower_wallet.covers(amount) {
                return Err(DomainError::insufficient_funds(
                    Party::Borrower,
                    amount.value(),
                    borrower_wallet.value(),
                ));
            }
            Ok(TransferPlan {
                lender_wallet: lender_wallet.credit(amount),
                borrower_wallet: borrower_wallet.debit(amount),
            })
        }
    }
}
