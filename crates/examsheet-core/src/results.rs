//! Grading output types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of grading one answer sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    /// Questions answered correctly.
    pub correct_count: usize,
    /// Correctness of each question, aligned with the answer key.
    pub per_question_correct: Vec<bool>,
    /// One entry per section, in section order. Empty when the exam has no sections.
    pub sections_breakdown: Vec<SectionScore>,
}

impl GradingResult {
    pub fn question_count(&self) -> usize {
        self.per_question_correct.len()
    }

    /// Correct answers credited to some section. Never exceeds `correct_count`.
    pub fn attributed_count(&self) -> usize {
        self.sections_breakdown.iter().map(|s| s.correct_count).sum()
    }
}

/// Correct answers and question total for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    pub title: String,
    pub correct_count: usize,
    pub total_questions: usize,
}

impl fmt::Display for SectionScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct_count, self.total_questions)
    }
}

/// Per-question feedback shown next to each question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback<'a> {
    Correct,
    Incorrect { expected: &'a str },
}

impl fmt::Display for Feedback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "✔"),
            Feedback::Incorrect { expected } => write!(f, "✘({expected})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_marks() {
        assert_eq!(Feedback::Correct.to_string(), "✔");
        assert_eq!(Feedback::Incorrect { expected: "C" }.to_string(), "✘(C)");
    }

    #[test]
    fn section_score_display() {
        let score = SectionScore {
            title: "Math".into(),
            correct_count: 2,
            total_questions: 5,
        };
        assert_eq!(score.to_string(), "2/5");
    }

    #[test]
    fn empty_result_attributes_nothing() {
        let result = GradingResult {
            correct_count: 0,
            per_question_correct: vec![],
            sections_breakdown: vec![],
        };
        assert_eq!(result.question_count(), 0);
        assert_eq!(result.attributed_count(), 0);
    }
}
