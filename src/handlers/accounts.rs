//! Account management HTTP handlers.
//!
//! This module implements the account-related API endpoints:
//! - POST /v1/accounts - Create new account
//! - GET /v1/accounts/{id} - Get account by ID
//! - GET /v1/accounts - List all accounts

use crate::{
    app::AppState,
    error::AppError,
    models::account::{Account, AccountResponse, CreateAccountRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// Create a new account.
///
/// # Request Body
///
/// ```json
/// {
///   "account_id": "Id-123",
///   "balance": "1000"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: Returns the created account
/// - **Error (400)**: Duplicate id, empty id or negative balance
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), AppError> {
    tracing::info!("Creating account {}", request.account_id);
    request.validate()?;

    let account = state.store.create(Account::from(request))?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::from(account.as_ref())),
    ))
}

/// Get a specific account by ID.
///
/// # Response
///
/// - **Success (200 OK)**: Returns account details
/// - **Error (404)**: Account not found
pub async fn get_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<AccountResponse>, AppError> {
    tracing::info!("Retrieving account for id {}", account_id);

    let account = state
        .store
        .get(&account_id)
        .ok_or(AppError::AccountNotFound(account_id))?;

    Ok(Json(AccountResponse::from(account.as_ref())))
}

/// List all accounts, ordered by id.
pub async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountResponse>> {
    let responses = state
        .store
        .list()
        .iter()
        .map(|account| AccountResponse::from(account.as_ref()))
        .collect();

    Json(responses)
}
