//! Summary module
//!
//! Aggregations over the ledger for balances, debts and history.

pub mod service;

pub use service::{Debts, NetBalance, ProfileUser, SummaryService, TransactionView, UserProfile};
