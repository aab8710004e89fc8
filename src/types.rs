// src/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::helpers::{lenient_count, lenient_object, lenient_text};

/// Placeholder shown for identity fields the client left out.
pub const NOT_PROVIDED: &str = "Not provided";

/// The two fixed writing tasks of the test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    TableDescription,
    EssayWriting,
}

impl Task {
    pub const ALL: [Task; 2] = [Task::TableDescription, Task::EssayWriting];

    /// Label the upstream client writes at the head of each task block.
    pub fn label(&self) -> &'static str {
        match self {
            Task::TableDescription => "TASK 1 - TABLE DESCRIPTION",
            Task::EssayWriting => "TASK 2 - ESSAY WRITING",
        }
    }

    /// Minimum word count for the task to count as complete.
    pub fn min_words(&self) -> u64 {
        match self {
            Task::TableDescription => 150,
            Task::EssayWriting => 250,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Task::TableDescription => 1,
            Task::EssayWriting => 2,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// HTTP verbs the endpoint distinguishes between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Options,
    Post,
    Other(String),
}

impl HttpMethod {
    pub fn parse(method: &str) -> Self {
        match method.to_ascii_uppercase().as_str() {
            "OPTIONS" => HttpMethod::Options,
            "POST" => HttpMethod::Post,
            other => HttpMethod::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Options => write!(f, "OPTIONS"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Other(m) => write!(f, "{}", m),
        }
    }
}

/// Proctoring counters collected by the test client. Missing keys read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViolationCounts {
    #[serde(deserialize_with = "lenient_count")]
    pub total: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub tab_switching: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub app_switching: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub high_typing_speed: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub paste_detected: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub rapid_keystrokes: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub warning_count: Option<u64>,
}

/// Raw submission body as posted by the test client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub student_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub teacher_name: Option<String>,
    #[serde(deserialize_with = "lenient_object")]
    pub violations: Option<ViolationCounts>,
    #[serde(rename = "task1WordCount", deserialize_with = "lenient_count")]
    pub task1_word_count: Option<u64>,
    #[serde(rename = "task2WordCount", deserialize_with = "lenient_count")]
    pub task2_word_count: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub total_words: Option<u64>,
    #[serde(deserialize_with = "lenient_count")]
    pub test_duration: Option<u64>,
    /// Structured answers; when present they win over the `message` blob.
    #[serde(rename = "task1Answer", deserialize_with = "lenient_text")]
    pub task1_answer: Option<String>,
    #[serde(rename = "task2Answer", deserialize_with = "lenient_text")]
    pub task2_answer: Option<String>,
}

/// Violation counters with every key defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViolationSummary {
    pub total: u64,
    pub tab_switching: u64,
    pub app_switching: u64,
    pub high_typing_speed: u64,
    pub paste_detected: u64,
    pub rapid_keystrokes: u64,
    pub warning_count: u64,
}

/// A submission with no field left undefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedSubmission {
    pub message: String,
    pub student_name: String,
    pub teacher_name: String,
    pub violations: ViolationSummary,
    pub task1_word_count: u64,
    pub task2_word_count: u64,
    pub total_words: u64,
    pub test_duration: u64,
    pub task1_answer: Option<String>,
    pub task2_answer: Option<String>,
}

impl NormalizedSubmission {
    pub fn word_count(&self, task: Task) -> u64 {
        match task {
            Task::TableDescription => self.task1_word_count,
            Task::EssayWriting => self.task2_word_count,
        }
    }

    pub fn explicit_answer(&self, task: Task) -> Option<&str> {
        match task {
            Task::TableDescription => self.task1_answer.as_deref(),
            Task::EssayWriting => self.task2_answer.as_deref(),
        }
    }

    /// Whether the caller-supplied count meets the task minimum.
    pub fn meets_minimum(&self, task: Task) -> bool {
        self.word_count(task) >= task.min_words()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: SubmissionRequest = serde_json::from_value(json!({
            "message": "blob",
            "studentName": "Ana",
            "task1WordCount": 151,
            "task2WordCount": "260",
            "totalWords": 411,
            "testDuration": 3600,
            "violations": { "tabSwitching": 2, "pasteDetected": "1" }
        }))
        .unwrap();

        assert_eq!(request.message.as_deref(), Some("blob"));
        assert_eq!(request.student_name.as_deref(), Some("Ana"));
        assert_eq!(request.teacher_name, None);
        assert_eq!(request.task1_word_count, Some(151));
        assert_eq!(request.task2_word_count, Some(260));
        let violations = request.violations.unwrap();
        assert_eq!(violations.tab_switching, Some(2));
        assert_eq!(violations.paste_detected, Some(1));
        assert_eq!(violations.total, None);
    }

    #[test]
    fn test_bad_counts_do_not_fail_the_body() {
        let request: SubmissionRequest = serde_json::from_value(json!({
            "message": "blob",
            "task1WordCount": "lots",
            "task2WordCount": -4,
            "totalWords": null
        }))
        .unwrap();

        assert_eq!(request.task1_word_count, None);
        assert_eq!(request.task2_word_count, None);
        assert_eq!(request.total_words, None);
    }

    #[test]
    fn test_mistyped_identity_fields_do_not_fail_the_body() {
        let request: SubmissionRequest = serde_json::from_value(json!({
            "message": "blob",
            "studentName": 42,
            "teacherName": false,
            "violations": "none",
            "task1Answer": ["not", "text"]
        }))
        .unwrap();

        assert_eq!(request.student_name.as_deref(), Some("42"));
        assert_eq!(request.teacher_name, None);
        assert_eq!(request.violations, None);
        assert_eq!(request.task1_answer, None);

        let listed: SubmissionRequest =
            serde_json::from_value(json!({"message": "blob", "violations": [1, 2]})).unwrap();
        assert_eq!(listed.violations, None);
    }

    #[test]
    fn test_http_method_parse() {
        assert_eq!(HttpMethod::parse("post"), HttpMethod::Post);
        assert_eq!(HttpMethod::parse("OPTIONS"), HttpMethod::Options);
        assert_eq!(
            HttpMethod::parse("GET"),
            HttpMethod::Other("GET".to_string())
        );
    }

    #[test]
    fn test_task_thresholds() {
        assert_eq!(Task::TableDescription.min_words(), 150);
        assert_eq!(Task::EssayWriting.min_words(), 250);
        assert_eq!(Task::EssayWriting.label(), "TASK 2 - ESSAY WRITING");
    }
}
