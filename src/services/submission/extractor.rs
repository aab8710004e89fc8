// src/services/submission/extractor.rs

//! Answer extraction from the combined submission message.
//!
//! The test client renders both answers into one human-readable blob. Its
//! grammar, as far as this module relies on it:
//!
//! ```text
//! message  := preamble (SECTION section)*
//! section  := ... LABEL ... ANSWER answer [STATS ...]
//! SECTION  := "📋 "
//! ANSWER   := "📝 Student's Answer:"
//! STATS    := "📊"
//! ```
//!
//! The answer runs from the answer marker to the next statistics marker, or
//! to the end of the section when no statistics marker follows. Nothing here
//! fails: an unrecognised layout yields `None`.

use crate::types::{NormalizedSubmission, Task};

pub const SECTION_MARKER: &str = "📋 ";
pub const ANSWER_MARKER: &str = "📝 Student's Answer:";
pub const STATS_MARKER: &str = "📊";

/// Recovers the trimmed answer for `task` from `message`.
///
/// Returns `Some("")` when the answer marker is directly followed by the
/// statistics marker; callers decide how to render an empty answer.
pub fn extract_answer(message: &str, task: Task) -> Option<&str> {
    let label = task.label();

    message
        .split(SECTION_MARKER)
        .filter_map(|section| {
            let label_at = section.find(label)?;
            answer_in_section(&section[label_at + label.len()..])
        })
        .next()
}

/// Answer text following the first answer marker in `section`.
fn answer_in_section(section: &str) -> Option<&str> {
    let start = section.find(ANSWER_MARKER)? + ANSWER_MARKER.len();
    let rest = &section[start..];
    let end = rest.find(STATS_MARKER).unwrap_or(rest.len());

    Some(rest[..end].trim())
}

/// Both task answers, in task order.
pub fn extract_answers(message: &str) -> [Option<&str>; 2] {
    Task::ALL.map(|task| extract_answer(message, task))
}

/// Answer for `task`: the structured field when the client sent one,
/// otherwise whatever can be recovered from the message blob.
pub fn resolve_answer(submission: &NormalizedSubmission, task: Task) -> Option<&str> {
    submission
        .explicit_answer(task)
        .or_else(|| extract_answer(&submission.message, task))
}
