use bot_logging::{bot_debug, bot_info};
use homework_core::{NotifyOutcome, PipelineError};

use crate::Messenger;

/// Sends messages to one chat, skipping a repeat of the last message sent.
pub struct Notifier<M> {
    messenger: M,
    chat_id: String,
}

impl<M: Messenger> Notifier<M> {
    pub fn new(messenger: M, chat_id: impl Into<String>) -> Self {
        Self {
            messenger,
            chat_id: chat_id.into(),
        }
    }

    /// On failure the caller's `last_sent` stays as it was, so the same text is retried later.
    pub async fn notify(
        &self,
        message: &str,
        last_sent: Option<&str>,
    ) -> Result<NotifyOutcome, PipelineError> {
        if last_sent == Some(message) {
            bot_debug!("Message unchanged since last send, skipping");
            return Ok(NotifyOutcome {
                sent: false,
                last_sent: message.to_string(),
            });
        }

        self.messenger
            .send(&self.chat_id, message)
            .await
            .map_err(|err| PipelineError::Delivery(err.to_string()))?;
        bot_info!("Message sent to chat {}", self.chat_id);

        Ok(NotifyOutcome {
            sent: true,
            last_sent: message.to_string(),
        })
    }
}
