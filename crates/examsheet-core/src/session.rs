//! A single test-taker's grading session.
//!
//! The session owns the exam, checks the submission preconditions (a name and
//! a fully answered sheet), and allows exactly one successful grading pass.

use chrono::Utc;
use uuid::Uuid;

use crate::engine::GradingEngine;
use crate::error::{SectionError, SubmissionError};
use crate::model::{ExamDefinition, SubmittedAnswers};
use crate::report::GradeReport;
use crate::validation::validate_sections;

#[derive(Debug)]
pub struct GradingSession {
    id: Uuid,
    exam: ExamDefinition,
    graded: bool,
}

impl GradingSession {
    /// Start a session. Fails if the exam's sections cannot be graded.
    pub fn new(exam: ExamDefinition) -> Result<Self, SectionError> {
        validate_sections(&exam.sections, exam.question_count())?;
        let id = Uuid::new_v4();
        tracing::info!(session = %id, title = %exam.title, "exam session started");
        Ok(Self {
            id,
            exam,
            graded: false,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn exam(&self) -> &ExamDefinition {
        &self.exam
    }

    pub fn is_graded(&self) -> bool {
        self.graded
    }

    pub fn engine(&self) -> GradingEngine<'_> {
        GradingEngine::from_validated(&self.exam.correct_answers, &self.exam.sections)
    }

    /// Check preconditions and grade the sheet.
    ///
    /// A failed precondition leaves the session open for another attempt;
    /// once a sheet is graded every later call returns
    /// [`SubmissionError::AlreadyGraded`].
    pub fn submit(
        &mut self,
        student_name: &str,
        answers: SubmittedAnswers,
    ) -> Result<GradeReport, SubmissionError> {
        if self.graded {
            return Err(SubmissionError::AlreadyGraded);
        }

        let student_name = student_name.trim();
        if student_name.is_empty() {
            tracing::info!(session = %self.id, "submission rejected: missing name");
            return Err(SubmissionError::MissingName);
        }

        let unanswered = answers.unanswered();
        let missing_tail = self.exam.question_count().saturating_sub(answers.len());
        if !unanswered.is_empty() || missing_tail > 0 {
            let questions = unanswered
                .into_iter()
                .chain(answers.len() + 1..=self.exam.question_count())
                .collect::<Vec<_>>();
            tracing::info!(
                session = %self.id,
                unanswered = questions.len(),
                "submission rejected: unanswered questions"
            );
            return Err(SubmissionError::Unanswered { questions });
        }

        let result = self.engine().grade(&answers)?;
        self.graded = true;

        tracing::info!(
            session = %self.id,
            correct = result.correct_count,
            questions = result.question_count(),
            "exam graded"
        );

        Ok(GradeReport {
            session_id: self.id,
            graded_at: Utc::now(),
            student_name: student_name.to_string(),
            exam_title: self.exam.title.clone(),
            answers,
            correct_answers: self.exam.correct_answers.clone(),
            result,
        })
    }
}
