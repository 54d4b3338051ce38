//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;

use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Sends messages to one chat through a Telegram bot
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(api_url: &str, bot_token: &str, chat_id: &str, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            api_url.trim_end_matches('/'),
            bot_token
        );

        tracing::debug!("Created TelegramNotifier for chat {}", chat_id);

        Self {
            send_url,
            chat_id: chat_id.to_string(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        tracing::debug!(
            "Sending Telegram message to chat {} ({} chars)",
            self.chat_id,
            message.chars().count()
        );

        let response = self
            .http
            .post_form(&self.send_url, &params)
            .await
            .map_err(|e| crate::WatchError::Delivery(e.to_string()))?;

        if response.status != 200 {
            return Err(crate::WatchError::Delivery(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
