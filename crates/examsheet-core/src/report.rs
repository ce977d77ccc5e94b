//! Grade report handed to the results presenter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Messages;
use crate::model::SubmittedAnswers;
use crate::results::{Feedback, GradingResult};

/// A graded answer sheet with everything needed to present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    /// The grading session that produced this report.
    pub session_id: Uuid,
    /// When the sheet was graded.
    pub graded_at: DateTime<Utc>,
    pub student_name: String,
    pub exam_title: String,
    /// What the test-taker selected.
    pub answers: SubmittedAnswers,
    /// The answer key, for showing corrections.
    pub correct_answers: Vec<String>,
    pub result: GradingResult,
}

impl GradeReport {
    /// Feedback for a 0-based question index, `None` past the end of the exam.
    pub fn feedback(&self, index: usize) -> Option<Feedback<'_>> {
        let expected = self.correct_answers.get(index)?;
        if *self.result.per_question_correct.get(index)? {
            Some(Feedback::Correct)
        } else {
            Some(Feedback::Incorrect {
                expected: expected.as_str(),
            })
        }
    }

    /// e.g. "Puntaje total: 3 de 4".
    pub fn total_line(&self, messages: &Messages) -> String {
        format!(
            "{} {} {} {}",
            messages.score_total,
            self.result.correct_count,
            messages.score_of,
            self.result.question_count()
        )
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self, messages: &Messages) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.exam_title));
        md.push_str(&format!("**{}**\n\n", self.student_name));
        md.push_str(&format!("**{}**\n\n", self.total_line(messages)));

        if !self.result.sections_breakdown.is_empty() {
            md.push_str(&format!("**{}**\n\n", messages.score_by_subject));
            for section in &self.result.sections_breakdown {
                md.push_str(&format!("- {}: {}\n", section.title, section));
            }
            md.push('\n');
        }

        md.push_str("| # | Answer | Result |\n");
        md.push_str("|---|--------|--------|\n");
        for (i, given) in self.answers.iter().enumerate() {
            let feedback = self
                .feedback(i)
                .map(|f| f.to_string())
                .unwrap_or_default();
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                i + 1,
                given.unwrap_or("-"),
                feedback
            ));
        }

        md
    }
}
