// src/handlers/submit.rs

use serde_json::json;

use crate::responses::EndpointResponse;
use crate::services::submission::{normalize, parse_submission, resolve_answer};
use crate::services::telegram::{MessageTransport, TelegramBotClient, TelegramConfig};
use crate::services::Dispatcher;
use crate::types::{HttpMethod, Task};
use crate::utils::formatter::format_submission_report;
use crate::utils::{logger, Clock, Logger, RelayError, RelayResult, TimeService};
use crate::{log_error, log_info};

/// Handles one request against the submission endpoint.
///
/// The dispatcher slot holds either a ready dispatcher or the configuration
/// error that prevented building one; the latter is reported per request
/// without touching the network.
pub struct SubmissionHandler<T, C = TimeService> {
    dispatcher: RelayResult<Dispatcher<T>>,
    clock: C,
}

impl SubmissionHandler<TelegramBotClient> {
    /// Handler backed by the real Bot API client.
    pub fn from_config(config: RelayResult<TelegramConfig>) -> Self {
        Self::new(config.map(|config| {
            let chat_id = config.chat_id.clone();
            Dispatcher::new(TelegramBotClient::new(config), chat_id)
        }))
    }
}

impl<T: MessageTransport> SubmissionHandler<T> {
    pub fn new(dispatcher: RelayResult<Dispatcher<T>>) -> Self {
        Self::with_clock(dispatcher, TimeService::new())
    }
}

impl<T: MessageTransport, C: Clock> SubmissionHandler<T, C> {
    pub fn with_clock(dispatcher: RelayResult<Dispatcher<T>>, clock: C) -> Self {
        Self { dispatcher, clock }
    }

    pub fn dispatcher(&self) -> Option<&Dispatcher<T>> {
        self.dispatcher.as_ref().ok()
    }

    /// Entry point for hosts whose body read can fail; a failed read is a
    /// 400 before anything else is looked at.
    pub async fn handle_read(&self, method: &str, body: RelayResult<String>) -> EndpointResponse {
        match body {
            Ok(body) => self.handle(method, &body).await,
            Err(error) => reject(&logger().with_context("method", method), error),
        }
    }

    pub async fn handle(&self, method: &str, body: &str) -> EndpointResponse {
        let log = logger().with_context("method", method);

        match HttpMethod::parse(method) {
            HttpMethod::Options => return EndpointResponse::empty(200),
            HttpMethod::Other(method) => {
                return reject(&log, RelayError::method_not_allowed(method.as_str()));
            }
            HttpMethod::Post => {}
        }

        let submission = match parse_submission(body).and_then(normalize) {
            Ok(submission) => submission,
            Err(error) => return reject(&log, error),
        };
        let log = log.with_context("student_name", submission.student_name.as_str());

        let dispatcher = match &self.dispatcher {
            Ok(dispatcher) => dispatcher,
            Err(error) => return configuration_failure(&log, error),
        };

        let [task1_answer, task2_answer] = Task::ALL.map(|task| resolve_answer(&submission, task));
        let report = format_submission_report(
            &submission,
            task1_answer,
            task2_answer,
            &self.clock.now_utc(),
        );

        match dispatcher.dispatch(&report).await {
            Ok(receipt) => {
                log_info!(log =>
                    "✅ Test submission sent to Telegram",
                    json!({
                        "teacher_name": submission.teacher_name,
                        "task1_word_count": submission.task1_word_count,
                        "task2_word_count": submission.task2_word_count,
                        "violations": submission.violations.total,
                        "telegram_message_id": receipt.message_id,
                    })
                );
                EndpointResponse::accepted(receipt.message_id)
            }
            Err(error) => EndpointResponse::failed(
                500,
                error.failure.diagnostic(),
                Some(error.source.message),
            ),
        }
    }
}

/// Body read failure, reported the same way as a malformed body.
pub fn unreadable_body(cause: impl std::fmt::Display) -> RelayError {
    RelayError::parse_error("Invalid request body").with_details(
        [("cause".to_string(), json!(cause.to_string()))]
            .into_iter()
            .collect(),
    )
}

fn reject(log: &Logger, error: RelayError) -> EndpointResponse {
    log_info!(log =>
        "Rejected request",
        json!({ "reason": error.message, "code": error.error_code })
    );
    EndpointResponse::rejected(error.status_code(), error.message)
}

fn configuration_failure(log: &Logger, error: &RelayError) -> EndpointResponse {
    let headline = match error.error_code.as_deref() {
        Some("CONFIG_INVALID") => "Telegram configuration is invalid",
        _ => "Telegram bot is not configured",
    };
    log_error!(log =>
        headline,
        json!({ "error": error.message, "code": error.error_code })
    );
    EndpointResponse::failed(500, headline, Some(error.message.clone()))
}
