//! Transfer data models and API request/response types.
//!
//! This module defines:
//! - `TransferRequest`: Request body for moving funds between two accounts
//! - `TransferResult`: Outcome of a completed transfer, returned to clients

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message returned for every completed transfer.
pub const TRANSFER_SUCCESS_MESSAGE: &str = "Funds has been transferred successfully";

/// Request to transfer money between accounts.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_from_id": "Id-1",
///   "account_to_id": "Id-2",
///   "amount": "30.00"
/// }
/// ```
///
/// Constructed per API call and never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    /// Account to transfer from (will decrease)
    pub account_from_id: String,

    /// Account to transfer to (will increase)
    pub account_to_id: String,

    /// Amount to transfer, must be strictly positive
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(
        account_from_id: impl Into<String>,
        account_to_id: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            account_from_id: account_from_id.into(),
            account_to_id: account_to_id.into(),
            amount,
        }
    }
}

/// Outcome of a completed transfer.
///
/// # JSON Example
///
/// ```json
/// {
///   "transfer_id": "770e8400-e29b-41d4-a716-446655440002",
///   "account_from_id": "Id-1",
///   "account_to_id": "Id-2",
///   "amount": "30.00",
///   "message": "Funds has been transferred successfully",
///   "completed_at": "2025-12-21T16:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    pub transfer_id: Uuid,
    pub account_from_id: String,
    pub account_to_id: String,
    pub amount: Decimal,
    pub message: String,
    pub completed_at: DateTime<Utc>,
}

impl TransferResult {
    pub fn completed(request: &TransferRequest) -> Self {
        Self {
            transfer_id: Uuid::new_v4(),
            account_from_id: request.account_from_id.clone(),
            account_to_id: request.account_to_id.clone(),
            amount: request.amount,
            message: TRANSFER_SUCCESS_MESSAGE.to_string(),
            completed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_amount_accepts_string_and_number() {
        let from_string: TransferRequest = serde_json::from_str(
            r#"{"account_from_id": "A", "account_to_id": "B", "amount": "0.10"}"#,
        )
        .unwrap();
        let from_number: TransferRequest =
            serde_json::from_str(r#"{"account_from_id": "A", "account_to_id": "B", "amount": 30}"#)
                .unwrap();

        assert_eq!(from_string.amount, Decimal::from_str("0.10").unwrap());
        assert_eq!(from_number.amount, Decimal::new(30, 0));
    }

    #[test]
    fn test_completed_result_echoes_request() {
        let request = TransferRequest::new("A", "B", Decimal::new(30, 0));
        let result = TransferResult::completed(&request);

        assert_eq!(result.account_from_id, "A");
        assert_eq!(result.account_to_id, "B");
        assert_eq!(result.amount, Decimal::new(30, 0));
        assert_eq!(result.message, TRANSFER_SUCCESS_MESSAGE);
    }
}
