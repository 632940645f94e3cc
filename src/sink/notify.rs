//! Best-effort notification transports — chat bot and webhook POST.
//!
//! Dispatch talks to the `Notify` trait so the core has no direct network
//! dependency and tests can record fan-out with a fake.

use crate::config::Config;
use crate::entry::LogEntry;
use std::sync::Arc;

/// Fire-and-forget notification endpoints. Failures are reported by the
/// dispatcher, never propagated to the logging caller.
pub trait Notify: Send + Sync {
    /// Sends the message text to the configured chat bot.
    ///
    /// # Errors
    /// Transport failures, or missing bot credentials in config.
    fn send_chat(&self, text: &str) -> Result<(), crate::Error>;

    /// POSTs the full entry as a structured payload to `url`.
    ///
    /// # Errors
    /// Transport failures or non-success HTTP status.
    fn post_webhook(&self, url: &str, entry: &LogEntry) -> Result<(), crate::Error>;
}

/// Blocking HTTP implementation — Telegram Bot API for chat, JSON POST for
/// webhooks. Blocking is deliberate: each `log()` call completes or fails
/// before returning, matching the synchronous dispatch model.
pub struct HttpNotifier {
    config: Arc<Config>,
    client: reqwest::blocking::Client,
}

impl HttpNotifier {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Notify for HttpNotifier {
    fn send_chat(&self, text: &str) -> Result<(), crate::Error> {
        let (Some(token), Some(chat_id)) = (
            self.config.telegram_bot_token(),
            self.config.telegram_chat_id(),
        ) else {
            return Err(crate::Error::Format(
                "telegram bot token or chat id not configured".to_string(),
            ));
        };

        let url = format!("https://api.telegram.org/bot{token}/sendMessage");
        self.client
            .post(&url)
            .form(&[("chat_id", chat_id.as_str()), ("text", text)])
            .send()?
            .error_for_status()?;
        Ok(())
    }

    fn post_webhook(&self, url: &str, entry: &LogEntry) -> Result<(), crate::Error> {
        let payload = serde_json::to_string(entry)?;
        self.client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}
