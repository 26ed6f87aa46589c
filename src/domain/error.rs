//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

use super::AmountError;

/// Which side of a transfer a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Lender,
    Borrower,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Lender => "lender",
            Party::Borrower => "borrower",
        }
    }
}

/// Business rule violations raised by the lending rules.
///
/// These are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The paying party cannot cover the amount
    #[error("The {} doesn't have enough money in pocket", .party.as_str())]
    InsufficientFunds {
        party: Party,
        required: Decimal,
        available: Decimal,
    },

    /// Type tag other than BORROW or REPAY
    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    /// Invalid amount (zero, negative, or exceeds limit)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Lender and borrower are the same user
    #[error("Lender and borrower must be different users")]
    SameParty,
}

impl DomainError {
    pub fn insufficient_funds(party: Party, required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            party,
            required,
            available,
        }
    }

    /// Rejections that the caller is not allowed to perform (HTTP 403).
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::InsufficientFunds { .. } | Self::InvalidTransactionType(_)
        )
    }
}

impl From<AmountError> for DomainError {
    fn from(err: AmountError) -> Self {
        DomainError::InvalidAmount(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_funds_message_names_party() {
        let err = DomainError::insufficient_funds(Party::Lender, dec!(40), dec!(10));
        assert_eq!(err.to_string(), "The lender doesn't have enough money in pocket");
        assert!(err.is_forbidden());

        let err = DomainError::insufficient_funds(Party::Borrower, dec!(40), dec!(10));
        assert_eq!(err.to_string(), "The borrower doesn't have enough money in pocket");
    }

    #[test]
    fn test_amount_error_converts() {
        let err: DomainError = AmountError::NotPositive(dec!(0)).into();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
        assert!(!err.is_forbidden());
    }
}
