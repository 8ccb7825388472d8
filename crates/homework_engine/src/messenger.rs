//! Telegram Bot API delivery.
//!
//! Sends text through `POST /bot<token>/sendMessage`. Rate limiting and
//! formatting are left to Telegram; a refused message surfaces as
//! [`MessengerError`] and is retried by the poll loop on a later cycle.

use bot_logging::bot_debug;
use homework_core::PipelineError;
use serde_json::{json, Value};
use url::Url;

use crate::ClientSettings;

/// Telegram `sendMessage` text limit (UTF-8 characters).
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const TRUNCATED_SUFFIX: &str = "\n\n[truncated]";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    #[error("request to messaging channel failed: {0}")]
    Request(String),
    #[error("messaging channel timed out")]
    Timeout,
    #[error("messaging channel refused message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}

/// Outbound chat channel.
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), MessengerError>;
}

#[derive(Debug, Clone)]
pub struct TelegramMessenger {
    api_base: Url,
    bot_token: String,
    client: reqwest::Client,
}

impl TelegramMessenger {
    pub fn new(
        api_base: Url,
        bot_token: impl Into<String>,
        settings: &ClientSettings,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            api_base,
            bot_token: bot_token.into(),
            client: settings.build_client()?,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.as_str().trim_end_matches('/'),
            self.bot_token
        )
    }
}

#[async_trait::async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), MessengerError> {
        let payload = json!({
            "chat_id": chat_id,
            "text": truncate_message(text, TELEGRAM_MESSAGE_LIMIT),
        });

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let raw = response.bytes().await.map_err(map_reqwest_error)?;
        let body: Value = match serde_json::from_slice(&raw) {
            Ok(body) => body,
            Err(err) => {
                bot_debug!("Messaging channel replied {} with a non-JSON body: {}", status, err);
                Value::Null
            }
        };
        let description = body
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if !status.is_success() {
            return Err(MessengerError::Rejected {
                status: status.as_u16(),
                description,
            });
        }
        match body.get("ok").and_then(Value::as_bool) {
            Some(true) => Ok(()),
            Some(false) => Err(MessengerError::Rejected {
                status: status.as_u16(),
                description,
            }),
            None => Err(MessengerError::Request(format!(
                "status {} without a Bot API reply envelope",
                status.as_u16()
            ))),
        }
    }
}

// The request URL embeds the bot token, so it is stripped from errors.
fn map_reqwest_error(err: reqwest::Error) -> MessengerError {
    let err = err.without_url();
    if err.is_timeout() {
        return MessengerError::Timeout;
    }
    MessengerError::Request(err.to_string())
}

/// Truncate a message to fit within the Telegram character limit.
fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let budget = limit - TRUNCATED_SUFFIX.chars().count();
    let truncated: String = text.chars().take(budget).collect();
    format!("{truncated}{TRUNCATED_SUFFIX}")
}
