//! Funds transfer service.
//!
//! An HTTP JSON API holding account balances in memory and moving funds
//! between two accounts. Transfers lock both accounts in a fixed global
//! order, so concurrent transfers over the same pair (in either direction)
//! never deadlock and never lose an update.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: In-memory `DashMap` of accounts, each with its own lock
//! - **Money**: `rust_decimal::Decimal`, never floating point
//! - **Notifications**: log lines, or HMAC-signed webhooks

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
