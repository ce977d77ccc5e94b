//! The grading engine.
//!
//! Compares a submitted answer sheet against the answer key and tallies
//! correct answers per section.

use crate::error::{GradeError, SectionError};
use crate::model::{Section, SubmittedAnswers};
use crate::results::{GradingResult, SectionScore};
use crate::validation::validate_sections;

/// Grades answer sheets for one exam.
///
/// Borrows the answer key and section layout; construction rejects layouts
/// where a question could belong to more than one section.
#[derive(Debug, Clone, Copy)]
pub struct GradingEngine<'a> {
    correct_answers: &'a [String],
    sections: &'a [Section],
}

impl<'a> GradingEngine<'a> {
    pub fn new(correct_answers: &'a [String], sections: &'a [Section]) -> Result<Self, SectionError> {
        validate_sections(sections, correct_answers.len())?;
        Ok(Self::from_validated(correct_answers, sections))
    }

    /// Skip layout checks for sections that were already validated.
    pub(crate) fn from_validated(correct_answers: &'a [String], sections: &'a [Section]) -> Self {
        Self {
            correct_answers,
            sections,
        }
    }

    pub fn correct_answers(&self) -> &'a [String] {
        self.correct_answers
    }

    pub fn sections(&self) -> &'a [Section] {
        self.sections
    }

    /// Grade an answer sheet.
    ///
    /// Matching is exact and case-sensitive. An unanswered question counts as
    /// incorrect. A correct answer is credited to the first section covering
    /// its 1-based number, or to none.
    pub fn grade(&self, answers: &SubmittedAnswers) -> Result<GradingResult, GradeError> {
        if answers.len() != self.correct_answers.len() {
            return Err(GradeError::AnswerCountMismatch {
                expected: self.correct_answers.len(),
                actual: answers.len(),
            });
        }

        let mut correct_count = 0;
        let mut per_question_correct = Vec::with_capacity(answers.len());
        let mut sections_breakdown: Vec<SectionScore> = self
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| SectionScore {
                title: section.title.clone(),
                correct_count: 0,
                total_questions: self.section_total_questions(index),
            })
            .collect();

        for (i, (given, expected)) in answers.iter().zip(self.correct_answers).enumerate() {
            let is_correct = given == Some(expected.as_str());
            per_question_correct.push(is_correct);

            if is_correct {
                correct_count += 1;
                if let Some(index) = self.section_index_for(i + 1) {
                    sections_breakdown[index].correct_count += 1;
                }
            }
        }

        tracing::debug!(
            correct = correct_count,
            questions = per_question_correct.len(),
            "graded answer sheet"
        );

        Ok(GradingResult {
            correct_count,
            per_question_correct,
            sections_breakdown,
        })
    }

    /// Questions in the section at `index`; 0 when there is no such section.
    pub fn section_total_questions(&self, index: usize) -> usize {
        self.sections
            .get(index)
            .map_or(0, Section::question_count)
    }

    /// Index of the first section covering a 1-based question number.
    pub fn section_index_for(&self, question_number: usize) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.contains(question_number))
    }
}
