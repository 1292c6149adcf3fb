//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They handle validation, account locking and holder notifications.

pub mod notification_service;
pub mod transfer_service;
