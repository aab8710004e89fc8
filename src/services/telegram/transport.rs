// src/services/telegram/transport.rs

use serde::{Deserialize, Serialize};

use crate::utils::RelayResult;

/// Acknowledgement returned by a transport after a successful send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: Option<i64>,
}

/// Outbound "send text message" operation the dispatcher depends on.
///
/// Errors carry the provider's description in `RelayError::message` so the
/// dispatcher can classify them.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait MessageTransport {
    async fn send_text(&self, chat_id: &str, text: &str) -> RelayResult<DeliveryReceipt>;
}
