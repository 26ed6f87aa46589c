//! Shared application state handed to every route and middleware.

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::JwtKeys;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(pool: PgPool, jwt: JwtKeys) -> Self {
        Self { pool, jwt }
    }
}
