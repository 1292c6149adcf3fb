//! Error types and HTTP error response handling.
//!
//! This module defines the transfer validation errors raised by the transfer
//! engine and the application-wide error type that turns them into HTTP
//! responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;

/// Reasons a transfer request is rejected.
///
/// Every variant is a client-input error. None of them is retried and none
/// of them leaves a partially applied transfer behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransferError {
    /// Source or destination account does not exist.
    #[error("Account with number '{account_id}' does not exist. Please provide valid account number.")]
    UnknownAccount { account_id: String },

    /// Amount is zero or negative.
    #[error("Please provide valid(positive) amount to transfer, got {amount}.")]
    InvalidAmount { amount: Decimal },

    /// Source balance is lower than the requested amount.
    #[error("Account '{account_id}' does not have sufficient balance: available {balance}, requested {amount}.")]
    InsufficientBalance {
        account_id: String,
        balance: Decimal,
        amount: Decimal,
    },

    /// Crediting the destination would exceed the representable decimal range.
    #[error("Crediting account '{account_id}' would overflow its balance.")]
    BalanceOverflow { account_id: String },

    /// The new balance needs more significant digits than a decimal holds.
    #[error("Transfer would round the balance of account '{account_id}'; amount cannot be applied exactly.")]
    PrecisionLoss { account_id: String },
}

impl TransferError {
    pub fn unknown_account(account_id: impl Into<String>) -> Self {
        Self::UnknownAccount {
            account_id: account_id.into(),
        }
    }

    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::UnknownAccount { .. } => "unknown_account",
            TransferError::InvalidAmount { .. } => "invalid_amount",
            TransferError::InsufficientBalance { .. } => "insufficient_balance",
            TransferError::BalanceOverflow { .. } => "balance_overflow",
            TransferError::PrecisionLoss { .. } => "precision_loss",
        }
    }
}

/// Failure to hand a notification over for delivery.
///
/// Never surfaced to API callers; the transfer engine logs it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The background delivery task is gone.
    #[error("Notification channel closed")]
    ChannelClosed,

    /// Delivery queue is at capacity; the notification was dropped.
    #[error("Notification queue is full")]
    QueueFull,

    /// Payload could not be serialized.
    #[error("Failed to serialize notification: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Webhook URL is malformed or uses a disallowed scheme.
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),

    /// HTTP delivery failed.
    #[error("Webhook delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),
}

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Transfer Errors**: Validation failures of a transfer request
/// - **Resource Errors**: Requested account not found, or already exists
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Transfer request was rejected by the transfer engine.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Account with this id already exists.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Account id {0} already exists!")]
    DuplicateAccount(String),

    /// Requested account does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Account {0} not found")]
    AccountNotFound(String),

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Transfer` → 400 Bad Request
/// - `DuplicateAccount` → 400 Bad Request
/// - `AccountNotFound` → 404 Not Found
/// - `InvalidRequest` → 400 Bad Request
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Transfer(err) => (StatusCode::BAD_REQUEST, err.code()),
            AppError::DuplicateAccount(_) => (StatusCode::BAD_REQUEST, "duplicate_account"),
            AppError::AccountNotFound(_) => (StatusCode::NOT_FOUND, "account_not_found"),
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}
