//! Transfer service - Core business logic for moving funds between accounts.
//!
//! This service handles:
//! - Request validation against current account state
//! - Ordered two-account locking
//! - Debit/credit under both locks
//! - Best-effort holder notification after each leg
//!
//! # Deadlock Avoidance
//!
//! Every transfer locks its two accounts in the order given by [`lock_order`],
//! a total order over account ids that ignores which side is the source.
//! Two transfers touching the same pair, in either direction, therefore
//! always request the locks in the same sequence and can never wait on each
//! other in a cycle. There is no global lock: transfers on disjoint pairs run
//! in parallel.

use std::{cmp::Ordering, sync::Arc};

use parking_lot::MutexGuard;
use rust_decimal::Decimal;

use crate::{
    error::TransferError,
    models::{
        account::{Account, AccountSnapshot},
        notification::{credit_message, debit_message},
        transfer::{TransferRequest, TransferResult},
    },
    services::notification_service::Notifier,
    store::SharedStore,
};

/// Order in which two accounts must be locked.
///
/// Returns `(first, Some(second))` with the smaller id first, or
/// `(id, None)` when both ids are equal and a single lock suffices.
pub fn lock_order<'a>(a: &'a str, b: &'a str) -> (&'a str, Option<&'a str>) {
    match a.cmp(b) {
        Ordering::Less => (a, Some(b)),
        Ordering::Greater => (b, Some(a)),
        Ordering::Equal => (a, None),
    }
}

/// Balances of a transfer's accounts, held locked.
///
/// Guards are released when this value is dropped.
enum LockedBalances<'a> {
    /// Source and destination are the same account.
    Single(MutexGuard<'a, Decimal>),
    Pair {
        source: MutexGuard<'a, Decimal>,
        destination: MutexGuard<'a, Decimal>,
    },
}

impl LockedBalances<'_> {
    fn source(&mut self) -> &mut Decimal {
        match self {
            LockedBalances::Single(balance) => &mut **balance,
            LockedBalances::Pair { source, .. } => &mut **source,
        }
    }

    fn destination(&mut self) -> &mut Decimal {
        match self {
            LockedBalances::Single(balance) => &mut **balance,
            LockedBalances::Pair { destination, .. } => &mut **destination,
        }
    }

    fn is_single(&self) -> bool {
        matches!(self, LockedBalances::Single(_))
    }
}

/// Lock both accounts following [`lock_order`].
fn lock_accounts<'a>(source: &'a Account, destination: &'a Account) -> LockedBalances<'a> {
    match lock_order(source.account_id(), destination.account_id()) {
        (_, None) => LockedBalances::Single(source.lock()),
        (first, Some(_)) if first == source.account_id() => {
            let source = source.lock();
            let destination = destination.lock();
            LockedBalances::Pair {
                source,
                destination,
            }
        }
        _ => {
            let destination = destination.lock();
            let source = source.lock();
            LockedBalances::Pair {
                source,
                destination,
            }
        }
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), TransferError> {
    if amount <= Decimal::ZERO {
        tracing::error!(%amount, "Please provide valid(positive) amount to transfer.");
        return Err(TransferError::InvalidAmount { amount });
    }
    Ok(())
}

fn ensure_sufficient(
    account_id: &str,
    balance: Decimal,
    amount: Decimal,
) -> Result<(), TransferError> {
    if balance < amount {
        tracing::warn!(account_id, %balance, %amount, "Insufficient balance for transfer");
        return Err(TransferError::InsufficientBalance {
            account_id: account_id.to_string(),
            balance,
            amount,
        });
    }
    Ok(())
}

/// Exact sum of two decimals, or `None` when the result does not fit a
/// `Decimal` without rounding.
///
/// `Decimal` arithmetic silently rounds once a result needs more than 96
/// bits of mantissa, so the sum is carried out on aligned `i128` mantissas.
fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let (a, b) = (a.normalize(), b.normalize());
    let mut scale = a.scale().max(b.scale());
    let mut sum = aligned_mantissa(a, scale)?.checked_add(aligned_mantissa(b, scale)?)?;
    while scale > 0 && sum % 10 == 0 {
        sum /= 10;
        scale -= 1;
    }
    Decimal::try_from_i128_with_scale(sum, scale).ok()
}

fn aligned_mantissa(value: Decimal, scale: u32) -> Option<i128> {
    10i128
        .checked_pow(scale - value.scale())?
        .checked_mul(value.mantissa())
}

/// New balance after applying `delta`, refusing overflow and rounding.
fn apply_exact(account_id: &str, balance: Decimal, delta: Decimal) -> Result<Decimal, TransferError> {
    match exact_add(balance, delta) {
        Some(updated) => Ok(updated),
        None if balance.checked_add(delta).is_none() => {
            tracing::warn!(account_id, %balance, %delta, "Balance would overflow");
            Err(TransferError::BalanceOverflow {
                account_id: account_id.to_string(),
            })
        }
        None => {
            tracing::warn!(account_id, %balance, %delta, "Balance cannot be represented exactly");
            Err(TransferError::PrecisionLoss {
                account_id: account_id.to_string(),
            })
        }
    }
}

/// Validates and executes transfers against an account store.
#[derive(Clone)]
pub struct TransferEngine {
    store: SharedStore,
    notifier: Arc<dyn Notifier>,
}

impl TransferEngine {
    pub fn new(store: SharedStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Validate then execute a transfer.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`]; no balance changes when an error is returned.
    pub fn transfer_funds(&self, request: &TransferRequest) -> Result<TransferResult, TransferError> {
        self.validate(request)?;
        tracing::debug!("Request is validated successfully");

        let result = self.execute(request)?;
        tracing::info!(transfer_id = %result.transfer_id, "Funds has been transferred successfully");
        Ok(result)
    }

    /// Check a transfer request against current account state.
    ///
    /// Checks run in this order: source exists, destination exists, amount
    /// is positive, source balance covers the amount. Has no side effects.
    pub fn validate(&self, request: &TransferRequest) -> Result<(), TransferError> {
        let (source, _destination) = self.resolve(request)?;
        ensure_positive(request.amount)?;
        ensure_sufficient(source.account_id(), source.balance(), request.amount)
    }

    /// Move funds from source to destination.
    ///
    /// # Process
    ///
    /// 1. Re-resolve both accounts and re-check the amount
    /// 2. Lock both accounts in [`lock_order`]
    /// 3. Re-check the source balance under the locks
    /// 4. Compute both new balances exactly
    /// 5. Debit source, notify its holder
    /// 6. Credit destination, notify its holder
    ///
    /// The balance check happens under the locks, so a transfer validated
    /// earlier cannot overdraw an account that was drained in between.
    /// Both new balances are computed before either is written, so an
    /// overflow or a result that would need rounding leaves both untouched.
    pub fn execute(&self, request: &TransferRequest) -> Result<TransferResult, TransferError> {
        let (source, destination) = self.resolve(request)?;
        let amount = request.amount;
        ensure_positive(amount)?;

        let mut locked = lock_accounts(&source, &destination);

        ensure_sufficient(source.account_id(), *locked.source(), amount)?;
        let source_balance = apply_exact(source.account_id(), *locked.source(), -amount)?;
        // Self-transfer: the credit restores the balance the debit started from.
        let destination_balance = if locked.is_single() {
            *locked.source()
        } else {
            apply_exact(destination.account_id(), *locked.destination(), amount)?
        };

        *locked.source() = source_balance;
        tracing::info!(
            account_id = source.account_id(),
            %amount,
            balance = %source_balance,
            "Account has been debited"
        );
        self.notify(source.account_id(), source_balance, debit_message(amount, source_balance));

        *locked.destination() = destination_balance;
        tracing::info!(
            account_id = destination.account_id(),
            %amount,
            balance = %destination_balance,
            "Account has been credited"
        );
        self.notify(
            destination.account_id(),
            destination_balance,
            credit_message(amount, destination_balance),
        );

        Ok(TransferResult::completed(request))
    }

    fn resolve(&self, request: &TransferRequest) -> Result<(Arc<Account>, Arc<Account>), TransferError> {
        let source = self.lookup(&request.account_from_id)?;
        let destination = self.lookup(&request.account_to_id)?;
        Ok((source, destination))
    }

    fn lookup(&self, account_id: &str) -> Result<Arc<Account>, TransferError> {
        self.store.get(account_id).ok_or_else(|| {
            tracing::error!(
                "Account with number '{}' does not exist. Please provide valid account number.",
                account_id
            );
            TransferError::unknown_account(account_id)
        })
    }

    /// Best-effort notification; failures are logged and swallowed.
    fn notify(&self, account_id: &str, balance: Decimal, message: String) {
        let snapshot = AccountSnapshot {
            account_id: account_id.to_string(),
            balance,
        };
        if let Err(e) = self.notifier.notify_about_transfer(&snapshot, &message) {
            tracing::warn!(account_id, error = %e, "Failed to notify account holder");
        }
    }
}
