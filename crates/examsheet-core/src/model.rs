//! Core data model types for examsheet.
//!
//! These are the fundamental types that the entire examsheet system uses
//! to represent an exam, its sections, and a test-taker's answers.

use serde::{Deserialize, Serialize};

/// Letter labels for answer options, in display order.
pub const OPTION_LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Number of options per question when the exam doesn't say.
pub const DEFAULT_OPTIONS: u8 = 4;

/// A loaded, normalized exam. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDefinition {
    /// Display title.
    pub title: String,
    /// Selectable choices per question (1..=5).
    #[serde(default = "default_options")]
    pub number_of_options: u8,
    /// Answer key; element `i` is the correct token for question `i + 1`.
    pub correct_answers: Vec<String>,
    /// Score breakdown groups. Empty means the exam has no sections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

fn default_options() -> u8 {
    DEFAULT_OPTIONS
}

impl ExamDefinition {
    /// Number of questions. Always the answer key length.
    pub fn question_count(&self) -> usize {
        self.correct_answers.len()
    }

    /// Option labels offered for every question, e.g. `["A", "B", "C", "D"]`.
    pub fn option_letters(&self) -> &'static [&'static str] {
        let n = usize::from(self.number_of_options).min(OPTION_LETTERS.len());
        &OPTION_LETTERS[..n]
    }
}

/// A contiguous, inclusive, 1-based range of questions grouped under a title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub start: usize,
    pub end: usize,
}

impl Section {
    pub fn new(title: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            title: title.into(),
            start,
            end,
        }
    }

    /// Whether the 1-based question number falls inside this section.
    pub fn contains(&self, question_number: usize) -> bool {
        question_number >= self.start && question_number <= self.end
    }

    /// Number of questions covered, `end - start + 1`.
    pub fn question_count(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }
}

/// A test-taker's selections, aligned by index with the answer key.
///
/// `None` marks an unanswered question. Empty strings are normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedAnswers(Vec<Option<String>>);

impl SubmittedAnswers {
    pub fn new(answers: Vec<Option<String>>) -> Self {
        Self(
            answers
                .into_iter()
                .map(|a| a.filter(|s| !s.is_empty()))
                .collect(),
        )
    }

    /// Build from answered tokens only.
    pub fn from_letters<I, S>(letters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(letters.into_iter().map(|l| Some(l.into())).collect())
    }

    /// Parse a comma-separated list such as `"A,B,,D"`; blank entries are unanswered.
    pub fn parse_list(list: &str) -> Self {
        if list.trim().is_empty() {
            return Self::default();
        }
        Self::new(
            list.split(',')
                .map(|s| Some(s.trim().to_string()))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The answer at a 0-based index; `None` when unanswered or out of range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|a| a.as_deref())
    }

    /// 1-based numbers of the questions left unanswered.
    pub fn unanswered(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.0.iter().map(|a| a.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_bounds_and_count() {
        let s = Section::new("Math", 3, 7);
        assert!(s.contains(3));
        assert!(s.contains(7));
        assert!(!s.contains(2));
        assert!(!s.contains(8));
        assert_eq!(s.question_count(), 5);
        assert_eq!(Section::new("One", 4, 4).question_count(), 1);
        assert_eq!(Section::new("Inverted", 5, 2).question_count(), 0);
    }

    #[test]
    fn option_letters_follow_option_count() {
        let mut exam = ExamDefinition {
            title: "T".into(),
            number_of_options: 3,
            correct_answers: vec!["A".into()],
            sections: vec![],
        };
        assert_eq!(exam.option_letters(), &["A", "B", "C"]);
        exam.number_of_options = 9;
        assert_eq!(exam.option_letters().len(), 5);
    }

    #[test]
    fn submitted_answers_parse_list() {
        let answers = SubmittedAnswers::parse_list("A, B,,D");
        assert_eq!(answers.len(), 4);
        assert_eq!(answers.get(1), Some("B"));
        assert_eq!(answers.get(2), None);
        assert_eq!(answers.unanswered(), vec![3]);
        assert!(SubmittedAnswers::parse_list("  ").is_empty());
    }

    #[test]
    fn empty_strings_count_as_unanswered() {
        let answers = SubmittedAnswers::new(vec![Some("A".into()), Some(String::new()), None]);
        assert_eq!(answers.unanswered(), vec![2, 3]);
    }

    #[test]
    fn exam_json_uses_camel_case() {
        let exam: ExamDefinition = serde_json::from_str(
            r#"{"title":"Quiz","correctAnswers":["A","C"],"sections":[{"title":"S","start":1,"end":2}]}"#,
        )
        .unwrap();
        assert_eq!(exam.number_of_options, DEFAULT_OPTIONS);
        assert_eq!(exam.question_count(), 2);
        assert_eq!(exam.sections[0].title, "S");

        let json = serde_json::to_string(&exam).unwrap();
        assert!(json.contains("\"numberOfOptions\":4"));
        assert!(json.contains("\"correctAnswers\""));
    }
}
