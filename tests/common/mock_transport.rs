// Mock transport for endpoint tests
// Records every send and replays a scripted outcome, without network access

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use writing_test_relay::services::telegram::{DeliveryReceipt, MessageTransport};
use writing_test_relay::utils::{RelayError, RelayResult};

pub struct MockTransport {
    outcome: RelayResult<DeliveryReceipt>,
    calls: AtomicUsize,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockTransport {
    pub fn delivering(message_id: i64) -> Self {
        Self::with_outcome(Ok(DeliveryReceipt {
            message_id: Some(message_id),
        }))
    }

    pub fn failing(description: &str) -> Self {
        Self::with_outcome(Err(RelayError::telegram_error(description)))
    }

    fn with_outcome(outcome: RelayResult<DeliveryReceipt>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, text)| text.clone())
    }

    pub fn last_chat_id(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(chat, _)| chat.clone())
    }
}

#[async_trait::async_trait]
impl MessageTransport for MockTransport {
    async fn send_text(&self, chat_id: &str, text: &str) -> RelayResult<DeliveryReceipt> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        self.outcome.clone()
    }
}
