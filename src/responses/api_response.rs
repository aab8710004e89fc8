use serde::Serialize;
use serde_json::Value;

/// Success envelope returned after the report was delivered.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAccepted {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_message_id: Option<i64>,
}

impl SubmissionAccepted {
    pub fn new(telegram_message_id: Option<i64>) -> Self {
        Self {
            success: true,
            message: "Test submitted successfully to Telegram".to_string(),
            telegram_message_id,
        }
    }
}

/// Failure envelope for configuration and delivery problems.
#[derive(Debug, Serialize)]
pub struct SubmissionFailed {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SubmissionFailed {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}

/// Short rejection body for requests that never reached dispatch.
#[derive(Debug, Serialize)]
pub struct RequestRejected {
    pub error: String,
}

/// Host-independent HTTP reply: status plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl EndpointResponse {
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        // The envelopes above only hold strings, numbers and bools.
        let body = serde_json::to_value(body).unwrap_or(Value::Null);
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn accepted(telegram_message_id: Option<i64>) -> Self {
        Self::json(200, &SubmissionAccepted::new(telegram_message_id))
    }

    pub fn failed(status: u16, error: impl Into<String>, details: Option<String>) -> Self {
        Self::json(status, &SubmissionFailed::new(error, details))
    }

    pub fn rejected(status: u16, error: impl Into<String>) -> Self {
        Self::json(
            status,
            &RequestRejected {
                error: error.into(),
            },
        )
    }
}
