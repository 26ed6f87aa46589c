//! Command definitions
//!
//! Commands represent intentions to change the system state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::TransactionType;
use crate::store::{TransactionRecord, UserRecord};

/// Command to register a new user
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterUserCommand {
    pub fn new(email: String, password: String, name: String) -> Self {
        Self {
            email,
            password,
            name,
        }
    }
}

/// Command to exchange credentials for a bearer token
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Command to add funds to a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpCommand {
    pub user_id: i64,
    /// Raw amount; validated into an `Amount` by the handler
    pub amount: Decimal,
}

impl TopUpCommand {
    pub fn new(user_id: i64, amount: Decimal) -> Self {
        Self { user_id, amount }
    }
}

/// Command to move funds between a lender and a borrower
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    pub lender_id: i64,
    pub borrower_id: i64,
    /// Raw amount; validated into an `Amount` by the handler
    pub amount: Decimal,
    /// Raw type tag; anything but BORROW or REPAY is rejected
    pub kind: String,
}

impl TransferCommand {
    pub fn new(lender_id: i64, borrower_id: i64, amount: Decimal, kind: impl Into<String>) -> Self {
        Self {
            lender_id,
            borrower_id,
            amount,
            kind: kind.into(),
        }
    }

    pub fn lending(lender_id: i64, borrower_id: i64, amount: Decimal) -> Self {
        Self::new(lender_id, borrower_id, amount, TransactionType::Borrow.as_str())
    }

    pub fn repayment(lender_id: i64, borrower_id: i64, amount: Decimal) -> Self {
        Self::new(lender_id, borrower_id, amount, TransactionType::Repay.as_str())
    }
}

/// A registered user as returned to callers (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub wallet: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for RegisteredUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            wallet: user.wallet,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
}

/// Result of a successful top-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopUpResult {
    pub status: String,
    pub message: String,
}

/// A persisted ledger transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResult {
    pub id: i64,
    pub lender_id: i64,
    pub borrower_id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

impl From<TransactionRecord> for TransferResult {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            lender_id: record.lender_id,
            borrower_id: record.borrower_id,
            amount: record.amount,
            kind: record.kind,
            created_at: record.created_at,
        }
    }
}
