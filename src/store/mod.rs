//! Store module
//!
//! Postgres-backed identity and ledger repositories.

pub mod ledger;
pub mod users;

pub use ledger::{DebtTotals, LedgerRepository, Role, TransactionRecord, TransactionViewRow};
pub use users::{UserRecord, UserRepository};
