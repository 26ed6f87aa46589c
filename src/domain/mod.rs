//! Domain module
//!
//! Core domain types and lending rules.

pub mod amount;
pub mod context;
pub mod error;
pub mod lending;
pub mod transaction_type;
pub mod wallet;

pub use amount::{Amount, AmountError};
pub use context::OperationContext;
pub use error::{DomainError, Party};
pub use lending::{plan_transfer, TransferPlan};
pub use transaction_type::TransactionType;
pub use wallet::Wallet;
