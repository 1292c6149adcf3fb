//! Notification models for balance-change webhooks.
//!
//! # Webhook Flow
//!
//! 1. Operator configures `WEBHOOK_URL` and `WEBHOOK_SECRET`
//! 2. Each debit or credit of a transfer produces one notification
//! 3. A background task POSTs the signed payload to the configured URL
//! 4. Receivers verify the signature using the shared secret
//!
//! # Security
//!
//! - Payloads are signed using HMAC-SHA256
//! - HTTPS is required except for localhost

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::account::AccountSnapshot;

/// Webhook payload sent to the configured endpoint.
///
/// # Example
///
/// ```json
/// {
///   "event_type": "account.balance_changed",
///   "event_id": "550e8400-e29b-41d4-a716-446655440000",
///   "account_id": "Id-1",
///   "balance": "70",
///   "message": "Your account has been debited with amount: 30. Your updated balance is: 70",
///   "created_at": "2025-01-15T10:30:00Z"
/// }
/// ```
///
/// # Signature Verification
///
/// The webhook includes an `X-Webhook-Signature` header with format:
/// `sha256=<hex_encoded_hmac>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub event_type: String,
    pub event_id: Uuid,
    pub account_id: String,
    pub balance: Decimal,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NotificationPayload {
    pub fn new(account: &AccountSnapshot, message: &str) -> Self {
        Self {
            event_type: "account.balance_changed".to_string(),
            event_id: Uuid::new_v4(),
            account_id: account.account_id.clone(),
            balance: account.balance,
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Message sent to the source account holder after the debit.
pub fn debit_message(amount: Decimal, balance: Decimal) -> String {
    format!(
        "Your account has been debited with amount: {}. Your updated balance is: {}",
        amount, balance
    )
}

/// Message sent to the destination account holder after the credit.
pub fn credit_message(amount: Decimal, balance: Decimal) -> String {
    format!(
        "Your account has been credited with amount: {}. Your updated balance is: {}",
        amount, balance
    )
}
