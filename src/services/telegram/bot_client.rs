// src/services/telegram/bot_client.rs

//! Telegram Bot API Client
//!
//! Sends plain-text messages through the Bot API `sendMessage` method.
//! Single attempt per call; failures are returned to the caller.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::config::TelegramConfig;
use super::transport::{DeliveryReceipt, MessageTransport};
use crate::utils::{RelayError, RelayResult};
use crate::{log_debug, log_info};

/// Message id reported by the client in test mode.
pub const TEST_MODE_MESSAGE_ID: i64 = 12345;

/// Envelope the Bot API wraps every response in.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

/// Telegram Bot API Client
pub struct TelegramBotClient {
    config: TelegramConfig,
    http_client: Client,
}

impl TelegramBotClient {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Send a message to Telegram
    pub async fn send_message(&self, chat_id: &str, text: &str) -> RelayResult<DeliveryReceipt> {
        let payload = json!({
            "chat_id": chat_id,
            "text": text,
        });

        if self.config.is_test_mode {
            log_info!(
                "🧪 Test mode: Would send to Telegram",
                json!({ "chat_id": chat_id, "length": text.chars().count() })
            );
            return Ok(DeliveryReceipt {
                message_id: Some(TEST_MODE_MESSAGE_ID),
            });
        }

        let url = self.config.method_url("sendMessage")?;
        log_debug!("Sending message to Telegram", json!({ "chat_id": chat_id }));

        let response = self
            .http_client
            .post(url)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        parse_send_response(status.as_u16(), &response_text)
    }
}

/// Interprets a `sendMessage` response body.
pub fn parse_send_response(status: u16, body: &str) -> RelayResult<DeliveryReceipt> {
    let parsed: ApiResponse<SentMessage> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return Err(RelayError::telegram_error(format!(
                "Telegram API error {}: {}",
                status, body
            )))
        }
    };

    if !parsed.ok {
        let code = parsed.error_code.unwrap_or(i64::from(status));
        let description = parsed
            .description
            .unwrap_or_else(|| "Unknown error".to_string());
        return Err(RelayError::telegram_error(format!(
            "Telegram API error {}: {}",
            code, description
        )));
    }

    Ok(DeliveryReceipt {
        message_id: parsed.result.map(|m| m.message_id),
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl MessageTransport for TelegramBotClient {
    async fn send_text(&self, chat_id: &str, text: &str) -> RelayResult<DeliveryReceipt> {
        self.send_message(chat_id, text).await
    }
}
