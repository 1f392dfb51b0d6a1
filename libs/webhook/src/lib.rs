//! Posts prepared notifications to Teams incoming webhooks.
//!
//! ```no_run
//! use tnotify_core::adaptivecard::new_simple_message;
//! use tnotify_webhook::{WebhookClient, WebhookConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WebhookClient::new(WebhookConfig::default().with_retries(2))?;
//! let mut message = new_simple_message("build finished")?;
//! client
//!     .send("https://contoso.webhook.office.com/webhookb2/abc", &mut message)
//!     .await?;
//! # Ok(())
//! # }
//! ```
mod client;
mod config;
mod error;
mod notification;

pub use client::{EXPECTED_RESPONSE_TEXT, WebhookClient};
pub use config::{
    DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT, DEFAULT_URL_PATTERNS, WebhookConfig, default_user_agent,
};
pub use error::DeliveryError;
pub use notification::Notification;
