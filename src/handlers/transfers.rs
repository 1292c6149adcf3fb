//! Transfer HTTP handler.
//!
//! - POST /v1/accounts/transfer - Move money between accounts

use crate::{
    app::AppState,
    error::AppError,
    models::transfer::{TransferRequest, TransferResult},
};
use axum::{Json, extract::State};

/// Transfer money between accounts.
///
/// # Request Body
///
/// ```json
/// {
///   "account_from_id": "Id-1",
///   "account_to_id": "Id-2",
///   "amount": "30"
/// }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: Returns the transfer result
/// - **Error (400)**: `unknown_account`, `invalid_amount`,
///   `insufficient_balance` or `balance_overflow`
///
/// # Atomicity
///
/// Both balances change under both account locks, or neither changes.
pub async fn transfer_funds(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResult>, AppError> {
    tracing::info!(
        "Transferring money: {} -> {} amount {}",
        request.account_from_id,
        request.account_to_id,
        request.amount
    );

    let result = state.engine.transfer_funds(&request)?;

    Ok(Json(result))
}
