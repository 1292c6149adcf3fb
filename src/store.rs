//! In-memory account store.
//!
//! Accounts are kept in a `DashMap` keyed by account id. Each entry is an
//! `Arc<Account>`: lookups hand out shared references and the transfer engine
//! mutates balances in place under each account's own lock, so the map itself
//! is never locked for the duration of a transfer.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};

use crate::{error::AppError, models::account::Account};

/// Shared handle to the account store.
pub type SharedStore = Arc<AccountStore>;

#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: DashMap<String, Arc<Account>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `DuplicateAccount`: an account with the same id already exists
    pub fn create(&self, account: Account) -> Result<Arc<Account>, AppError> {
        match self.accounts.entry(account.account_id().to_string()) {
            Entry::Occupied(entry) => Err(AppError::DuplicateAccount(entry.key().clone())),
            Entry::Vacant(entry) => {
                let account = Arc::new(account);
                entry.insert(Arc::clone(&account));
                Ok(account)
            }
        }
    }

    pub fn get(&self, account_id: &str) -> Option<Arc<Account>> {
        self.accounts
            .get(account_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// All accounts, ordered by id.
    pub fn list(&self) -> Vec<Arc<Account>> {
        let mut accounts: Vec<Arc<Account>> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        accounts.sort_by(|a, b| a.account_id().cmp(b.account_id()));
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
