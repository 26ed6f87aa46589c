//! User Repository
//!
//! Identity store: user rows and their wallet balances.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Amount, Wallet};

/// A row of the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// argon2 PHC string; never leaves the crate over the API
    pub password: String,
    pub wallet: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn wallet(&self) -> Wallet {
        Wallet::new(self.wallet)
    }
}

/// Repository for the identity store
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, name, password, wallet, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, name, password, wallet, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// True when either the email or the display name is already taken.
    pub async fn email_or_name_taken(&self, email: &str, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 OR name = $2)",
        )
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    /// Insert a new user with an empty wallet.
    pub async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password, name, wallet)
            VALUES ($1, $2, $3, 0)
            RETURNING id, email, name, password, wallet, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    /// Atomically add `amount` to a wallet. Returns the new balance, or `None`
    /// when the user does not exist.
    pub async fn add_to_wallet(&self, id: i64, amount: &Amount) -> Result<Option<Decimal>, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            UPDATE users
            SET wallet = wallet + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING wallet
            "#,
        )
        .bind(id)
        .bind(amount.value())
        .fetch_optional(&self.pool)
        .await
    }

    /// Lock the wallets of the given users for the rest of `tx`.
    ///
    /// Rows are locked in ascending id order so two transfers between the
    /// same pair cannot deadlock. Missing ids are simply absent from the result.
    pub async fn lock_wallets(
        tx: &mut Transaction<'_, Postgres>,
        ids: &[i64],
    ) -> Result<Vec<(i64, Decimal)>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, wallet
            FROM users
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(ids)
        .fetch_all(&mut **tx)
        .await
    }

    pub async fn set_wallet(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
        wallet: Wallet,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET wallet = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(wallet.value())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}
