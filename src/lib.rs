//! peer_lending - Peer-to-peer lending backend API
//!
//! Users hold wallet balances, lend to and repay each other, and query
//! their net balance, outstanding debts and transaction history.

use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
mod error;
pub mod handlers;
mod state;
pub mod store;
pub mod summary;

pub use auth::JwtKeys;
pub use config::Config;
pub use domain::{Amount, AmountError, DomainError, OperationContext, TransactionType, Wallet};
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Layers run outermost-last: cors -> request id -> trace -> propagate -> logging -> routes
    let api_router = api::create_router(state.clone())
        .layer(middleware::from_fn(api::middleware::logging_middleware));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        // Health check (no auth)
        .route("/health", get(health_check))
        .merge(api_router)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
