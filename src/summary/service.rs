//! Summary Service
//!
//! Read side of the ledger: net balance, debt totals and the per-user
//! transaction listing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::domain::TransactionType;
use crate::error::AppError;
use crate::store::{DebtTotals, LedgerRepository, Role, TransactionViewRow, UserRepository};

/// `{userId, balance}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetBalance {
    pub user_id: i64,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub wallet: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Debts {
    /// What this user still owes others (BORROW rows as borrower)
    pub debt_to_others: Decimal,
    /// What others owe this user (BORROW rows as lender)
    pub debt_from_others: Decimal,
}

impl From<DebtTotals> for Debts {
    fn from(totals: DebtTotals) -> Self {
        Self {
            debt_to_others: totals.as_borrower.unwrap_or(Decimal::ZERO),
            debt_from_others: totals.as_lender.unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user: ProfileUser,
    pub debts: Debts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: i64,
    pub lender_name: String,
    pub borrower_name: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub date: DateTime<Utc>,
}

impl From<TransactionViewRow> for TransactionView {
    fn from(row: TransactionViewRow) -> Self {
        Self {
            id: row.id,
            lender_name: row.lender_name,
            borrower_name: row.borrower_name,
            amount: row.amount,
            kind: row.kind,
            date: row.created_at,
        }
    }
}

/// Summary Service for ledger aggregates
#[derive(Debug, Clone)]
pub struct SummaryService {
    users: UserRepository,
    ledger: LedgerRepository,
}

impl SummaryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            ledger: LedgerRepository::new(pool),
        }
    }

    /// Role-agnostic signed sum over the user's transactions; zero when there are none.
    /// The user is not required to exist.
    pub async fn net_balance(&self, user_id: i64) -> Result<NetBalance, AppError> {
        let balance = self.ledger.net_balance(user_id).await?.unwrap_or(Decimal::ZERO);

        tracing::debug!(user_id, %balance, "Computed net balance");

        Ok(NetBalance { user_id, balance })
    }

    pub async fn user_profile(&self, user_id: i64) -> Result<UserProfile, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;

        let debts = self.ledger.debt_totals(user_id).await?.into();

        Ok(UserProfile {
            user: ProfileUser {
                id: user.id,
                name: user.name,
                email: user.email,
                wallet: user.wallet,
            },
            debts,
        })
    }

    /// Snapshot of the user's transactions, most recent first.
    pub async fn list_transactions(
        &self,
        user_id: i64,
        role: Option<Role>,
    ) -> Result<Vec<TransactionView>, AppError> {
        let rows = self.ledger.list_for_user(user_id, role).await?;

        Ok(rows.into_iter().map(TransactionView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debts_default_to_zero() {
        let debts: Debts = DebtTotals::default().into();
        assert_eq!(debts.debt_to_others, Decimal::ZERO);
        assert_eq!(debts.debt_from_others, Decimal::ZERO);
    }

    #[test]
    fn test_debts_map_roles() {
        let debts: Debts = DebtTotals {
            as_borrower: Some(dec!(40)),
            as_lender: None,
        }
        .into();

        assert_eq!(debts.debt_to_others, dec!(40));
        assert_eq!(debts.debt_from_others, Decimal::ZERO);
    }

    #[test]
    fn test_view_json_shape() {
        let view = TransactionView::from(TransactionViewRow {
            id: 3,
            lender_name: "alice".to_string(),
            borrower_name: "bob".to_string(),
            amount: dec!(15),
            kind: TransactionType::Repay,
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["lenderName"], "alice");
        assert_eq!(json["borrowerName"], "bob");
        assert_eq!(json["type"], "REPAY");
        assert!(json.get("date").is_some());
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = UserProfile {
            user: ProfileUser {
                id: 1,
                name: "alice".to_string(),
                email: "alice@example.com".to_string(),
                wallet: dec!(75),
            },
            debts: Debts {
                debt_to_others: Decimal::ZERO,
                debt_from_others: dec!(40),
            },
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["debts"]["debtFromOthers"], "40");
        assert_eq!(json["user"]["email"], "alice@example.com");
        assert!(json["user"].get("password").is_none());
    }
}
