// src/utils/formatter.rs

use chrono::{DateTime, Utc};

use crate::types::{NormalizedSubmission, Task};
use crate::utils::time::format_report_time;

pub const TEST_NAME: &str = "IELTS Writing Test - Set Four";
pub const NO_ANSWER: &str = "No answer provided";
pub const PASS_GLYPH: &str = "✅";
pub const FAIL_GLYPH: &str = "❌";

/// Proctoring warnings allowed before the client force-submits.
pub const MAX_WARNINGS: u64 = 2;

pub const TASK1_QUESTION: &str = "The table below shows the change in the number of people (million) taking part in five different physical activities between 2001 and 2009.

Summarise the information by selecting and reporting the main features, making comparisons where relevant.

Write at least 150 words.";

pub const TASK2_QUESTION: &str = "Some people say manufacturers and supermarkets are responsible for reducing the packaging on the products they sell. Others argue that consumers should buy products with less packaging. Discuss both views and give your own opinion.";

/// Static prompt text for a task.
pub fn task_question(task: Task) -> &'static str {
    match task {
        Task::TableDescription => TASK1_QUESTION,
        Task::EssayWriting => TASK2_QUESTION,
    }
}

/// Pass/fail glyph for a caller-supplied word count.
pub fn threshold_glyph(word_count: u64, task: Task) -> &'static str {
    if word_count >= task.min_words() {
        PASS_GLYPH
    } else {
        FAIL_GLYPH
    }
}

/// Blank answers render as the placeholder, never as an empty section.
pub fn format_answer(answer: Option<&str>) -> &str {
    answer
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(NO_ANSWER)
}

fn format_task_section(
    submission: &NormalizedSubmission,
    task: Task,
    heading_icon: &str,
    answer: Option<&str>,
) -> String {
    let words = submission.word_count(task);
    format!(
        "{icon} {label}\n\
         Question:\n\
         {question}\n\n\
         📝 Student's Answer:\n\
         {answer}\n\n\
         📊 Task {n} Statistics:\n\
         • Words: {words}\n\
         • Actual Word Count: {words}",
        icon = heading_icon,
        label = task.label(),
        question = task_question(task),
        answer = format_answer(answer),
        n = task.number(),
        words = words,
    )
}

/// Renders the Telegram report for one submission.
///
/// Word-count glyphs compare the counts the client sent against the task
/// minimums; the answer text itself is never counted.
pub fn format_submission_report(
    submission: &NormalizedSubmission,
    task1_answer: Option<&str>,
    task2_answer: Option<&str>,
    rendered_at: &DateTime<Utc>,
) -> String {
    let timestamp = format_report_time(rendered_at);
    let v = &submission.violations;

    let mut report = String::with_capacity(2048);
    report.push_str("📝 IELTS WRITING TEST SUBMITTED\n\n");

    report.push_str(&format!(
        "👤 STUDENT INFORMATION\n\
         • Name: {}\n\
         • Teacher: {}\n\
         • Test: {}\n\
         • Timestamp: {}\n\
         • Duration: {} seconds\n\n",
        submission.student_name,
        submission.teacher_name,
        TEST_NAME,
        timestamp,
        submission.test_duration,
    ));

    report.push_str(&format_task_section(
        submission,
        Task::TableDescription,
        "📋",
        task1_answer,
    ));
    report.push_str("\n\n");
    report.push_str(&format_task_section(
        submission,
        Task::EssayWriting,
        "📝",
        task2_answer,
    ));
    report.push_str("\n\n");

    report.push_str(&format!(
        "📈 OVERALL STATISTICS\n\
         • Total Words Written: {}\n\
         • Task 1 Words: {} {}\n\
         • Task 2 Words: {} {}\n\n",
        submission.total_words,
        submission.task1_word_count,
        threshold_glyph(submission.task1_word_count, Task::TableDescription),
        submission.task2_word_count,
        threshold_glyph(submission.task2_word_count, Task::EssayWriting),
    ));

    report.push_str(&format!(
        "🚨 VIOLATION REPORT\n\
         • Total Violations: {}\n\
         • Tab Switching: {}\n\
         • App Switching: {}\n\
         • High Typing Speed: {}\n\
         • Paste Detected: {}\n\
         • Rapid Keystrokes: {}\n\
         • Final Warnings: {}/{}\n\n",
        v.total,
        v.tab_switching,
        v.app_switching,
        v.high_typing_speed,
        v.paste_detected,
        v.rapid_keystrokes,
        v.warning_count,
        MAX_WARNINGS,
    ));

    report.push_str(&format!(
        "---\n\
         ✅ Test automatically submitted and recorded\n\
         🕒 System Time: {}",
        timestamp
    ));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViolationSummary;
    use chrono::TimeZone;

    fn create_test_submission() -> NormalizedSubmission {
        NormalizedSubmission {
            message: String::new(),
            student_name: "Ana Lima".to_string(),
            teacher_name: "Mr. Reyes".to_string(),
            violations: ViolationSummary::default(),
            task1_word_count: 150,
            task2_word_count: 249,
            total_words: 399,
            test_duration: 3540,
            task1_answer: None,
            task2_answer: None,
        }
    }

    fn rendered_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_threshold_glyph_boundaries() {
        assert_eq!(threshold_glyph(149, Task::TableDescription), FAIL_GLYPH);
        assert_eq!(threshold_glyph(150, Task::TableDescription), PASS_GLYPH);
        assert_eq!(threshold_glyph(249, Task::EssayWriting), FAIL_GLYPH);
        assert_eq!(threshold_glyph(250, Task::EssayWriting), PASS_GLYPH);
    }

    #[test]
    fn test_format_answer_placeholder() {
        assert_eq!(format_answer(None), NO_ANSWER);
        assert_eq!(format_answer(Some("")), NO_ANSWER);
        assert_eq!(format_answer(Some(" \n ")), NO_ANSWER);
        assert_eq!(format_answer(Some("Essay")), "Essay");
    }

    #[test]
    fn test_report_layout() {
        let report = format_submission_report(
            &create_test_submission(),
            Some("Table answer"),
            None,
            &rendered_at(),
        );

        assert!(report.starts_with("📝 IELTS WRITING TEST SUBMITTED\n\n👤 STUDENT INFORMATION\n"));
        assert!(report.contains("• Name: Ana Lima\n"));
        assert!(report.contains("• Teacher: Mr. Reyes\n"));
        assert!(report.contains("• Test: IELTS Writing Test - Set Four\n"));
        assert!(report.contains("• Timestamp: 2024-05-02 09:30:00 UTC\n"));
        assert!(report.contains("• Duration: 3540 seconds\n"));
        assert!(report.contains("📋 TASK 1 - TABLE DESCRIPTION\nQuestion:\nThe table below"));
        assert!(report.contains("📝 Student's Answer:\nTable answer\n\n📊 Task 1 Statistics:"));
        assert!(report.contains("📝 TASK 2 - ESSAY WRITING\nQuestion:\nSome people say"));
        assert!(report.contains("📝 Student's Answer:\nNo answer provided\n\n📊 Task 2 Statistics:"));
        assert!(report.contains("• Task 1 Words: 150 ✅\n"));
        assert!(report.contains("• Task 2 Words: 249 ❌\n"));
        assert!(report.contains("• Final Warnings: 0/2\n"));
        assert!(report.ends_with("🕒 System Time: 2024-05-02 09:30:00 UTC"));
    }

    #[test]
    fn test_report_without_violations_shows_zeroes() {
        let report =
            format_submission_report(&create_test_submission(), None, None, &rendered_at());

        for line in [
            "• Total Violations: 0",
            "• Tab Switching: 0",
            "• App Switching: 0",
            "• High Typing Speed: 0",
            "• Paste Detected: 0",
            "• Rapid Keystrokes: 0",
        ] {
            assert!(report.contains(line), "missing line: {}", line);
        }
    }

    #[test]
    fn test_report_round_trips_through_extractor() {
        use crate::services::submission::extract_answers;

        let report = format_submission_report(
            &create_test_submission(),
            Some("First answer"),
            Some("Second answer"),
            &rendered_at(),
        );
        assert_eq!(
            extract_answers(&report),
            [Some("First answer"), Some("Second answer")]
        );
    }
}
