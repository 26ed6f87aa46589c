//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::JwtKeys;
use crate::domain::{OperationContext, TransactionType};
use crate::error::AppError;
use crate::handlers::{
    LoginCommand, LoginHandler, LoginResult, RegisterUserCommand, RegisterUserHandler,
    RegisteredUser, TopUpCommand, TopUpHandler, TopUpResult, TransferCommand, TransferHandler,
    TransferResult,
};
use crate::state::AppState;
use crate::store::Role;
use crate::summary::{NetBalance, SummaryService, TransactionView, UserProfile};

use super::extract::{AppJson, AppPath, AppQuery};
use super::middleware::auth_middleware;

// =========================================================================
// Request types
// =========================================================================

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Any id is accepted; an unknown user is reported as not found.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
    pub user_id: i64,
    pub amount: Decimal,
}

/// Body of `/transactions/lending` and `/transactions/repay`; the route fixes the type.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    #[validate(range(min = 1))]
    pub lender_id: i64,
    #[validate(range(min = 1))]
    pub borrower_id: i64,
    pub amount: Decimal,
}

/// Body of `POST /transactions`; `type` defaults to BORROW.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[validate(range(min = 1))]
    pub lender_id: i64,
    #[validate(range(min = 1))]
    pub borrower_id: i64,
    pub amount: Decimal,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    pub user_id: i64,
    #[serde(default)]
    pub role: Option<Role>,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router. Everything except registration and login sits
/// behind the bearer token middleware.
pub fn create_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/user/profile/:user_id", get(get_user_profile))
        .route("/user/wallet/top-up", post(top_up_wallet))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/lending", post(create_lending))
        .route("/transactions/repay", post(create_repayment))
        .route("/transactions/summary", post(get_summary))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/user", post(create_user))
        .route("/auth/login", post(login))
        .merge(protected)
}

// =========================================================================
// POST /user
// =========================================================================

/// Register a new user
async fn create_user(
    State(pool): State<PgPool>,
    AppJson(request): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<RegisteredUser>), AppError> {
    request.validate()?;

    let command = RegisterUserCommand::new(request.email, request.password, request.name);
    let user = RegisterUserHandler::new(pool).execute(command).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// =========================================================================
// POST /auth/login
// =========================================================================

async fn login(
    State(pool): State<PgPool>,
    State(keys): State<JwtKeys>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResult>, AppError> {
    request.validate()?;

    let command = LoginCommand {
        email: request.email,
        password: request.password,
    };

    let result = LoginHandler::new(pool, keys).execute(command).await?;

    Ok(Json(result))
}

// =========================================================================
// GET /user/profile/:user_id
// =========================================================================

async fn get_user_profile(
    State(pool): State<PgPool>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = SummaryService::new(pool).user_profile(user_id).await?;

    Ok(Json(profile))
}

// =========================================================================
// POST /user/wallet/top-up
// =========================================================================

async fn top_up_wallet(
    State(pool): State<PgPool>,
    Extension(context): Extension<OperationContext>,
    AppJson(request): AppJson<TopUpRequest>,
) -> Result<Json<TopUpResult>, AppError> {
    let command = TopUpCommand::new(request.user_id, request.amount);
    let result = TopUpHandler::new(pool).execute(command, &context).await?;

    Ok(Json(result))
}

// =========================================================================
// POST /transactions/lending, /transactions/repay, /transactions
// =========================================================================

async fn create_lending(
    State(pool): State<PgPool>,
    Extension(context): Extension<OperationContext>,
    AppJson(request): AppJson<TransferRequest>,
) -> Result<(StatusCode, Json<TransferResult>), AppError> {
    request.validate()?;

    let command = TransferCommand::lending(request.lender_id, request.borrower_id, request.amount);
    execute_transfer(pool, command, &context).await
}

async fn create_repayment(
    State(pool): State<PgPool>,
    Extension(context): Extension<OperationContext>,
    AppJson(request): AppJson<TransferRequest>,
) -> Result<(StatusCode, Json<TransferResult>), AppError> {
    request.validate()?;

    let command =
        TransferCommand::repayment(request.lender_id, request.borrower_id, request.amount);
    execute_transfer(pool, command, &context).await
}

async fn create_transaction(
    State(pool): State<PgPool>,
    Extension(context): Extension<OperationContext>,
    AppJson(request): AppJson<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransferResult>), AppError> {
    request.validate()?;

    let kind = request
        .kind
        .unwrap_or_else(|| TransactionType::default().as_str().to_string());
    let command = TransferCommand::new(request.lender_id, request.borrower_id, request.amount, kind);
    execute_transfer(pool, command, &context).await
}

async fn execute_transfer(
    pool: PgPool,
    command: TransferCommand,
    context: &OperationContext,
) -> Result<(StatusCode, Json<TransferResult>), AppError> {
    let result = TransferHandler::new(pool).execute(command, context).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

// =========================================================================
// POST /transactions/summary
// =========================================================================

async fn get_summary(
    State(pool): State<PgPool>,
    AppJson(request): AppJson<SummaryRequest>,
) -> Result<Json<NetBalance>, AppError> {
    request.validate()?;

    let balance = SummaryService::new(pool).net_balance(request.user_id).await?;

    Ok(Json(balance))
}

// =========================================================================
// GET /transactions?userId=N
// =========================================================================

async fn list_transactions(
    State(pool): State<PgPool>,
    AppQuery(query): AppQuery<TransactionsQuery>,
) -> Result<Json<Vec<TransactionView>>, AppError> {
    let transactions = SummaryService::new(pool)
        .list_transactions(query.user_id, query.role)
        .await?;

    Ok(Json(transactions))
}
