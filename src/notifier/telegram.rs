//! Delivery through the Telegram Bot API `sendMessage` method.
use crate::error::Error;
use crate::message::FormattedText;
use crate::notifier::Notifier;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Debug)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

/// The part of a Bot API error response we surface. Other fields (`ok`, `error_code`) are
/// ignored; the HTTP status is authoritative.
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    #[serde(default)]
    description: Option<String>,
}

/// Sends every message to one chat with one bot.
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Create a notifier posting to `{api_base}/bot{bot_token}/sendMessage`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client can't be built.
    pub fn new(
        api_base: &str,
        bot_token: &str,
        chat_id: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{bot_token}/sendMessage", api_base.trim_end_matches('/')),
            chat_id: chat_id.to_string(),
        })
    }
}

// The endpoint embeds the bot token, keep it out of logs.
impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, message: &FormattedText) -> Result<(), Error> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text: &message.text,
            parse_mode: message.parse_mode.api_name(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("sendMessage accepted with {status}");
            return Ok(());
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        let description = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|err| err.description)
            .unwrap_or(body);
        Err(Error::UpstreamDelivery {
            status: status.as_u16(),
            description,
        })
    }
}
