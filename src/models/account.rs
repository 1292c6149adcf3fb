//! Account data models and API request/response types.
//!
//! This module defines:
//! - `Account`: In-memory account record with its own balance lock
//! - `AccountSnapshot`: Point-in-time copy of an account's balance
//! - `CreateAccountRequest`: Request body for creating accounts
//! - `AccountResponse`: Response body returned to clients

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An account record held by the account store.
///
/// # Locking
///
/// The balance lives behind a mutex owned by this account alone. The balance
/// is only ever read or written while that mutex is held, and accounts are
/// mutated in place so every holder of the `Arc<Account>` observes the same
/// state.
///
/// # Balance Storage
///
/// Balances are `rust_decimal::Decimal` and never go through binary floating
/// point. Transfers refuse any update whose result would need rounding.
#[derive(Debug)]
pub struct Account {
    account_id: String,
    balance: Mutex<Decimal>,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(account_id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            balance: Mutex::new(balance),
            created_at: Utc::now(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Current balance, read under the account lock.
    pub fn balance(&self) -> Decimal {
        *self.balance.lock()
    }

    /// Acquire this account's lock.
    ///
    /// Callers taking two account locks must go through
    /// [`crate::services::transfer_service::lock_order`].
    pub(crate) fn lock(&self) -> MutexGuard<'_, Decimal> {
        self.balance.lock()
    }
}

/// Copy of an account's id and balance at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    pub account_id: String,
    pub balance: Decimal,
}

/// Request body for creating a new account.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": "Id-123",
///   "balance": "1000.50"
/// }
/// ```
///
/// # Validation
///
/// - `account_id`: Required, non-empty
/// - `balance`: Optional, defaults to 0, must not be negative
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub account_id: String,

    #[serde(default)]
    pub balance: Decimal,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.account_id.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "account_id must not be empty".to_string(),
            ));
        }
        if self.balance < Decimal::ZERO {
            return Err(AppError::InvalidRequest(
                "Initial balance must be positive.".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<CreateAccountRequest> for Account {
    fn from(request: CreateAccountRequest) -> Self {
        Account::new(request.account_id, request.balance)
    }
}

/// Response body for account endpoints.
///
/// # JSON Example
///
/// ```json
/// {
///   "account_id": "Id-123",
///   "balance": "1000.50",
///   "created_at": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub account_id: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id.clone(),
            balance: account.balance(),
            created_at: account.created_at,
        }
    }
}
