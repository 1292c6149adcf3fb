//! Notification service for telling account holders about balance changes.
//!
//! The transfer engine calls a [`Notifier`] after each leg of a transfer.
//! Notifications are advisory: implementations must not block, and any
//! error they return is logged by the caller and otherwise ignored.
//!
//! Two implementations are provided:
//! - [`LoggingNotifier`]: writes the message to the log
//! - [`WebhookNotifier`]: queues a signed JSON payload that a background
//!   task POSTs to a configured URL

use std::time::Duration;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::error::NotificationError;
use crate::models::{account::AccountSnapshot, notification::NotificationPayload};

type HmacSha256 = Hmac<Sha256>;

/// Sends a human-readable message to an account holder.
pub trait Notifier: Send + Sync {
    fn notify_about_transfer(
        &self,
        account: &AccountSnapshot,
        message: &str,
    ) -> Result<(), NotificationError>;
}

/// Notifier that only writes to the log.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify_about_transfer(
        &self,
        account: &AccountSnapshot,
        message: &str,
    ) -> Result<(), NotificationError> {
        tracing::info!(
            account_id = %account.account_id,
            "Sending notification to owner of {}: {}",
            account.account_id,
            message
        );
        Ok(())
    }
}

/// Notifier delivering signed webhooks from a background task.
///
/// # Ordering
///
/// Payloads go through a single bounded channel drained by one task, so
/// they are delivered in the order `notify_about_transfer` was called.
///
/// # Backpressure
///
/// When the queue is full (slow or unreachable endpoint) new notifications
/// are refused with `QueueFull` instead of waiting, so callers never block.
///
/// # Headers Sent
///
/// - `Content-Type: application/json`
/// - `X-Webhook-Signature: sha256=<hex>`
/// - `X-Webhook-Event-Id: <uuid>`
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    sender: mpsc::Sender<NotificationPayload>,
}

impl WebhookNotifier {
    /// Validate the URL and start the delivery task.
    ///
    /// Must be called from within a tokio runtime. The task runs until every
    /// `WebhookNotifier` clone has been dropped.
    ///
    /// # Errors
    ///
    /// - `InvalidUrl`: URL is malformed, too long, or plain HTTP to a remote host
    /// - `Delivery`: HTTP client could not be built
    ///
    /// A `capacity` of zero is treated as one.
    pub fn spawn(
        url: String,
        secret: String,
        timeout: Duration,
        capacity: usize,
    ) -> Result<(Self, JoinHandle<()>), NotificationError> {
        validate_webhook_url(&url)?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(deliver_notifications(client, url, secret, receiver));

        Ok((Self { sender }, handle))
    }
}

impl Notifier for WebhookNotifier {
    fn notify_about_transfer(
        &self,
        account: &AccountSnapshot,
        message: &str,
    ) -> Result<(), NotificationError> {
        self.sender
            .try_send(NotificationPayload::new(account, message))
            .map_err(|e| match e {
                TrySendError::Full(_) => NotificationError::QueueFull,
                TrySendError::Closed(_) => NotificationError::ChannelClosed,
            })
    }
}

/// Drain the queue, sending each payload in turn.
///
/// A failed delivery is logged and the next payload is sent anyway.
async fn deliver_notifications(
    client: reqwest::Client,
    url: String,
    secret: String,
    mut receiver: mpsc::Receiver<NotificationPayload>,
) {
    while let Some(payload) = receiver.recv().await {
        if let Err(e) = send_webhook(&client, &url, &secret, &payload).await {
            tracing::error!("Failed to send webhook to {}: {:?}", url, e);
        }
    }
    tracing::debug!("Notification channel closed, webhook delivery stopped");
}

async fn send_webhook(
    client: &reqwest::Client,
    url: &str,
    secret: &str,
    payload: &NotificationPayload,
) -> Result<(), NotificationError> {
    let payload_json = serde_json::to_string(payload)?;
    let signature = generate_signature(secret, &payload_json);

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .header("X-Webhook-Signature", &signature)
        .header("X-Webhook-Event-Id", payload.event_id.to_string())
        .body(payload_json)
        .send()
        .await?
        .error_for_status()?;

    tracing::debug!(
        event_id = %payload.event_id,
        status = response.status().as_u16(),
        "Webhook delivered"
    );
    Ok(())
}

/// Generate HMAC-SHA256 signature for webhook payload.
///
/// # Format
///
/// `sha256=<hex_encoded_hmac>`
pub fn generate_signature(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC key length is valid");
    mac.update(payload.as_bytes());
    let result = mac.finalize();
    format!("sha256={}", hex::encode(result.into_bytes()))
}

/// Validate webhook URL format.
///
/// # Rules
///
/// - Must be valid URL
/// - Must be HTTPS (HTTP localhost allowed for development)
/// - Maximum 2048 characters
pub fn validate_webhook_url(url: &str) -> Result<(), NotificationError> {
    if url.len() > 2048 {
        return Err(NotificationError::InvalidUrl(
            "URL exceeds 2048 characters".to_string(),
        ));
    }

    let parsed = url::Url::parse(url)
        .map_err(|_| NotificationError::InvalidUrl("Invalid URL format".to_string()))?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" => match parsed.host_str() {
            Some("localhost" | "127.0.0.1" | "0.0.0.0") => Ok(()),
            _ => Err(NotificationError::InvalidUrl(
                "HTTP is only allowed for localhost. Use HTTPS for production.".to_string(),
            )),
        },
        _ => Err(NotificationError::InvalidUrl(
            "URL must use HTTP or HTTPS".to_string(),
        )),
    }
}
