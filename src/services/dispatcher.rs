// src/services/dispatcher.rs

use serde_json::json;

use crate::services::telegram::{DeliveryReceipt, MessageTransport};
use crate::utils::RelayError;
use crate::{log_error, log_info};

/// Known ways a delivery can fail, recognised from the provider's error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailure {
    ChatNotFound,
    Forbidden,
    Unauthorized,
    MessageTooLong,
    Other,
}

impl DeliveryFailure {
    /// Matches substrings of Telegram error descriptions, case-insensitively.
    pub fn classify(error: &RelayError) -> Self {
        let message = error.message.to_lowercase();

        if message.contains("chat not found") {
            DeliveryFailure::ChatNotFound
        } else if message.contains("forbidden") {
            DeliveryFailure::Forbidden
        } else if message.contains("unauthorized") {
            DeliveryFailure::Unauthorized
        } else if message.contains("message is too long") {
            DeliveryFailure::MessageTooLong
        } else {
            DeliveryFailure::Other
        }
    }

    /// User-facing explanation for the failure.
    pub fn diagnostic(&self) -> &'static str {
        match self {
            DeliveryFailure::ChatNotFound => {
                "Telegram chat not found. Check TELEGRAM_CHAT_ID and make sure the bot has been added to the chat."
            }
            DeliveryFailure::Forbidden => {
                "Telegram bot is not allowed to post in the configured chat. Add the bot to the chat and grant it permission to send messages."
            }
            DeliveryFailure::Unauthorized => {
                "Telegram rejected the bot token. Check TELEGRAM_BOT_TOKEN."
            }
            DeliveryFailure::MessageTooLong => {
                "Submission report exceeds the Telegram message size limit."
            }
            DeliveryFailure::Other => "Failed to send message to Telegram",
        }
    }
}

/// A delivery attempt that did not go through.
#[derive(Debug, Clone)]
pub struct DispatchError {
    pub failure: DeliveryFailure,
    pub source: RelayError,
}

impl DispatchError {
    pub fn new(source: RelayError) -> Self {
        Self {
            failure: DeliveryFailure::classify(&source),
            source,
        }
    }
}

/// Hands rendered reports to a transport for the one configured recipient.
pub struct Dispatcher<T> {
    transport: T,
    chat_id: String,
}

impl<T: MessageTransport> Dispatcher<T> {
    pub fn new(transport: T, chat_id: impl Into<String>) -> Self {
        Self {
            transport,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `report` once. No retry.
    pub async fn dispatch(&self, report: &str) -> Result<DeliveryReceipt, DispatchError> {
        match self.transport.send_text(&self.chat_id, report).await {
            Ok(receipt) => {
                log_info!(
                    "Report delivered",
                    json!({ "telegram_message_id": receipt.message_id })
                );
                Ok(receipt)
            }
            Err(e) => {
                let error = DispatchError::new(e);
                log_error!(
                    "❌ Error sending to Telegram",
                    json!({
                        "failure": format!("{:?}", error.failure),
                        "error": error.source.message,
                    })
                );
                Err(error)
            }
        }
    }
}
