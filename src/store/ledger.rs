//! Ledger Repository
//!
//! Append-only store of lending and repayment transactions, plus the
//! aggregate queries the summary service is built on.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Amount, TransactionType};

/// A row of the `transactions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: i64,
    pub lender_id: i64,
    pub borrower_id: i64,
    pub amount: Decimal,
    #[sqlx(rename = "type", try_from = "String")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// A transaction joined with both parties' display names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TransactionViewRow {
    pub id: i64,
    pub lender_name: String,
    pub borrower_name: String,
    pub amount: Decimal,
    #[sqlx(rename = "type", try_from = "String")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
}

/// Which side of the ledger rows to list for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Lender,
    Borrower,
}

/// BORROW totals for one user, split by role. `None` when no rows match.
#[derive(Debug, Clone, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct DebtTotals {
    pub as_borrower: Option<Decimal>,
    pub as_lender: Option<Decimal>,
}

/// Repository for the ledger store
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one transaction inside `tx`. The timestamp is assigned by the database.
    pub async fn append(
        tx: &mut Transaction<'_, Postgres>,
        lender_id: i64,
        borrower_id: i64,
        amount: &Amount,
        kind: TransactionType,
    ) -> Result<TransactionRecord, sqlx::Error> {
        sqlx::query_as::<_, TransactionRecord>(
            r#"
            INSERT INTO transactions (lender_id, borrower_id, amount, type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, lender_id, borrower_id, amount, type, created_at
            "#,
        )
        .bind(lender_id)
        .bind(borrower_id)
        .bind(amount.value())
        .bind(kind.as_str())
        .fetch_one(&mut **tx)
        .await
    }

    /// Signed sum over every row touching the user: BORROW adds, anything
    /// else subtracts. The user's role on the row is not considered.
    pub async fn net_balance(&self, user_id: i64) -> Result<Option<Decimal>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            SELECT SUM(CASE WHEN type = 'BORROW' THEN amount ELSE -amount END)
            FROM transactions
            WHERE lender_id = $1 OR borrower_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// BORROW totals where the user borrowed and where the user lent.
    /// REPAY rows are not netted here.
    pub async fn debt_totals(&self, user_id: i64) -> Result<DebtTotals, sqlx::Error> {
        sqlx::query_as::<_, DebtTotals>(
            r#"
            SELECT
                SUM(amount) FILTER (WHERE borrower_id = $1) AS as_borrower,
                SUM(amount) FILTER (WHERE lender_id = $1) AS as_lender
            FROM transactions
            WHERE type = 'BORROW' AND (lender_id = $1 OR borrower_id = $1)
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Rows touching the user, newest first. `role` narrows to rows where the
    /// user is the lender or the borrower.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        role: Option<Role>,
    ) -> Result<Vec<TransactionViewRow>, sqlx::Error> {
        let (as_lender, as_borrower) = match role {
            None => (true, true),
            Some(Role::Lender) => (true, false),
            Some(Role::Borrower) => (false, true),
        };

        sqlx::query_as::<_, TransactionViewRow>(
            r#"
            SELECT
                t.id,
                lender.name AS lender_name,
                borrower.name AS borrower_name,
                t.amount,
                t.type,
                t.created_at
            FROM transactions t
            JOIN users lender ON lender.id = t.lender_id
            JOIN users borrower ON borrower.id = t.borrower_id
            WHERE ($2 AND t.lender_id = $1) OR ($3 AND t.borrower_id = $1)
            ORDER BY t.created_at DESC, t.id DESC
            "#,
        )
        .bind(user_id)
        .bind(as_lender)
        .bind(as_borrower)
        .fetch_all(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_deserialize() {
        let role: Role = serde_json::from_str("\"lender\"").unwrap();
        assert_eq!(role, Role::Lender);
        let role: Role = serde_json::from_str("\"borrower\"").unwrap();
        assert_eq!(role, Role::Borrower);
        assert!(serde_json::from_str::<Role>("\"payer\"").is_err());
    }

    #[test]
    fn test_debt_totals_default_empty() {
        let totals = DebtTotals::default();
        assert!(totals.as_borrower.is_none());
        assert!(totals.as_lender.is_none());
    }
}
