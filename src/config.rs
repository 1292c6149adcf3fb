//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `WEBHOOK_URL` (optional): endpoint receiving balance-change notifications.
///   When unset, notifications are only written to the log.
/// - `WEBHOOK_SECRET` (optional): HMAC key used to sign webhook payloads
/// - `WEBHOOK_TIMEOUT_SECS` (optional): per-delivery timeout, defaults to 5
/// - `WEBHOOK_QUEUE_CAPACITY` (optional): notifications waiting for delivery
///   before new ones are dropped, defaults to 1024
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default)]
    pub webhook_secret: String,

    #[serde(default = "default_webhook_timeout")]
    pub webhook_timeout_secs: u64,

    #[serde(default = "default_webhook_queue_capacity")]
    pub webhook_queue_capacity: usize,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_webhook_timeout() -> u64 {
    5
}

fn default_webhook_queue_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into expected types.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: server_port -> SERVER_PORT
        envy::from_env::<Config>()
    }
}
