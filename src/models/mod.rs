//! Data models for accounts, transfers and notifications.

/// Account record and account API types
pub mod account;
/// Balance-change notification payloads
pub mod notification;
/// Transfer request and result types
pub mod transfer;
