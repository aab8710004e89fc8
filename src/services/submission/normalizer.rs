// src/services/submission/normalizer.rs

use crate::types::{
    NormalizedSubmission, SubmissionRequest, ViolationCounts, ViolationSummary, NOT_PROVIDED,
};
use crate::utils::helpers::non_blank;
use crate::utils::{RelayError, RelayResult};

/// Parses a raw request body into a `SubmissionRequest`.
pub fn parse_submission(body: &str) -> RelayResult<SubmissionRequest> {
    if body.trim().is_empty() {
        return Ok(SubmissionRequest::default());
    }

    serde_json::from_str(body).map_err(|e| {
        RelayError::parse_error("Invalid JSON body").with_details(
            [(
                "cause".to_string(),
                serde_json::Value::String(e.to_string()),
            )]
            .into_iter()
            .collect(),
        )
    })
}

/// Validates and defaults a submission.
///
/// Fails only when `message` is absent or empty; every other field falls back
/// to 0 or the "Not provided" placeholder.
pub fn normalize(request: SubmissionRequest) -> RelayResult<NormalizedSubmission> {
    let message = match request.message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(RelayError::validation_error("Message is required")),
    };

    Ok(NormalizedSubmission {
        message,
        student_name: display_name(request.student_name.as_deref()),
        teacher_name: display_name(request.teacher_name.as_deref()),
        violations: summarize_violations(request.violations.as_ref()),
        task1_word_count: request.task1_word_count.unwrap_or(0),
        task2_word_count: request.task2_word_count.unwrap_or(0),
        total_words: request.total_words.unwrap_or(0),
        test_duration: request.test_duration.unwrap_or(0),
        task1_answer: explicit_answer(request.task1_answer),
        task2_answer: explicit_answer(request.task2_answer),
    })
}

fn display_name(name: Option<&str>) -> String {
    non_blank(name)
        .map(|n| n.trim().to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}

fn explicit_answer(answer: Option<String>) -> Option<String> {
    non_blank(answer.as_deref()).map(|a| a.trim().to_string())
}

/// Reads each counter individually so a partially filled mapping still works.
pub fn summarize_violations(violations: Option<&ViolationCounts>) -> ViolationSummary {
    let Some(v) = violations else {
        return ViolationSummary::default();
    };

    ViolationSummary {
        total: v.total.unwrap_or(0),
        tab_switching: v.tab_switching.unwrap_or(0),
        app_switching: v.app_switching.unwrap_or(0),
        high_typing_speed: v.high_typing_speed.unwrap_or(0),
        paste_detected: v.paste_detected.unwrap_or(0),
        rapid_keystrokes: v.rapid_keystrokes.unwrap_or(0),
        warning_count: v.warning_count.unwrap_or(0),
    }
}
