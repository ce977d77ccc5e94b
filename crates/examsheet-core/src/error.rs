//! Error types for exam normalization, section layout, grading and submission.
//!
//! Defined in `examsheet-core` so the loader and CLI can match on the failure
//! kind instead of inspecting message strings.

use thiserror::Error;

use crate::config::Messages;

/// Errors turning raw exam data into an [`ExamDefinition`](crate::model::ExamDefinition).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamError {
    /// The source text is not valid JSON/TOML.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The data does not have the expected shape.
    #[error("malformed exam data: {0}")]
    Malformed(String),

    /// `numberOfOptions` outside the A–E letter range.
    #[error("numberOfOptions must be between 1 and 5, got {0}")]
    OptionCountOutOfRange(u64),

    /// A numbered answer key entry whose key is not a question number in `1..=10000`.
    #[error("invalid question number in correctAnswers: {0:?}")]
    InvalidQuestionNumber(String),
}

/// A section layout that cannot be graded unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("section {index} ({title}) starts at question {start}; questions are numbered from 1")]
    StartsBeforeFirst {
        index: usize,
        title: String,
        start: usize,
    },

    #[error("section {index} ({title}) starts at {start} after its end {end}")]
    Inverted {
        index: usize,
        title: String,
        start: usize,
        end: usize,
    },

    #[error("section {index} ({title}) ends at question {end} but the exam has {questions} questions")]
    PastLastQuestion {
        index: usize,
        title: String,
        end: usize,
        questions: usize,
    },

    #[error(
        "section {index} ({title}) starts at question {start}, overlapping or preceding the previous section which ends at {previous_end}"
    )]
    Overlap {
        index: usize,
        title: String,
        start: usize,
        previous_end: usize,
    },
}

/// Errors raised by the grading engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradeError {
    /// The answer sheet and answer key differ in length.
    #[error("expected {expected} answers, got {actual}")]
    AnswerCountMismatch { expected: usize, actual: usize },

    #[error(transparent)]
    Sections(#[from] SectionError),
}

/// Preconditions enforced before an answer sheet is graded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The test-taker name is empty or whitespace.
    #[error("student name is required")]
    MissingName,

    /// Some questions have no selection.
    #[error("unanswered questions: {}", join_numbers(.questions))]
    Unanswered { questions: Vec<usize> },

    /// The session already produced its single grade.
    #[error("this exam session has already been graded")]
    AlreadyGraded,

    #[error(transparent)]
    Grade(#[from] GradeError),
}

impl SubmissionError {
    /// The blocking notice shown to the test-taker, if there is one.
    pub fn user_message<'a>(&self, messages: &'a Messages) -> Option<&'a str> {
        match self {
            SubmissionError::MissingName => Some(&messages.enter_name),
            SubmissionError::Unanswered { .. } => Some(&messages.answer_all),
            _ => None,
        }
    }
}

fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
