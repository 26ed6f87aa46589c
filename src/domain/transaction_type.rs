//! Transaction type tag stored on every ledger row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Lender advances funds to the borrower.
    #[default]
    Borrow,
    /// Borrower returns funds to the lender.
    Repay,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Borrow => "BORROW",
            TransactionType::Repay => "REPAY",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BORROW" => Ok(TransactionType::Borrow),
            "REPAY" => Ok(TransactionType::Repay),
            other => Err(DomainError::InvalidTransactionType(other.to_string())),
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!("BORROW".parse::<TransactionType>().unwrap(), TransactionType::Borrow);
        assert_eq!("REPAY".parse::<TransactionType>().unwrap(), TransactionType::Repay);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "borrow".parse::<TransactionType>().unwrap_err();
        assert_eq!(err, DomainError::InvalidTransactionType("borrow".to_string()));
    }

    #[test]
    fn test_default_is_borrow() {
        assert_eq!(TransactionType::default(), TransactionType::Borrow);
    }

    #[test]
    fn test_serde_uses_upper_case_tags() {
        let json = serde_json::to_string(&TransactionType::Repay).unwrap();
        assert_eq!(json, "\"REPAY\"");
    }
}
