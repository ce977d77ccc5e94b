//! Exam data validation.
//!
//! [`validate_exam_data`] checks raw data before normalization and never
//! fails hard; it reports issues and leaves the decision to the caller.
//! [`validate_sections`] checks a normalized section layout for grading.

use serde_json::Value;

use crate::error::SectionError;
use crate::model::Section;

const REQUIRED_FIELDS: [&str; 3] = ["title", "numberOfOptions", "correctAnswers"];

/// A single problem found in raw exam data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The offending top-level field (if applicable).
    pub field: Option<String>,
    /// Diagnostic message.
    pub message: String,
}

/// All problems found in raw exam data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue {
            field: Some(field.to_string()),
            message: message.into(),
        });
    }
}

/// `true` when the raw exam data has every required field and a consistent
/// question count.
pub fn validate(raw: &Value) -> bool {
    validate_exam_data(raw).is_valid()
}

/// Validate raw exam data and collect every issue found.
///
/// Sections are deliberately not inspected here; see [`validate_sections`].
pub fn validate_exam_data(raw: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(data) = raw.as_object() else {
        report.issues.push(ValidationIssue {
            field: None,
            message: "exam data must be an object".into(),
        });
        return report;
    };

    for field in REQUIRED_FIELDS {
        if !data.contains_key(field) {
            report.push(field, format!("Missing required field: {field}"));
        }
    }

    let answer_count = match data.get("correctAnswers") {
        None => None,
        Some(Value::Array(answers)) => Some(answers.len()),
        Some(_) => {
            report.push("correctAnswers", "correctAnswers must be an array");
            None
        }
    };

    // Compared numerically, so `3.0` matches three answers; a non-number never matches.
    if let (Some(count), Some(declared)) = (answer_count, data.get("numberOfQuestions")) {
        if declared.as_f64() != Some(count as f64) {
            report.push(
                "numberOfQuestions",
                "Provided numberOfQuestions does not match correctAnswers length",
            );
        }
    }

    report
}

/// Check that sections are ordered, non-overlapping, and inside `[1, question_count]`.
///
/// Gaps between sections are allowed; questions in a gap simply earn no
/// section credit.
pub fn validate_sections(sections: &[Section], question_count: usize) -> Result<(), SectionError> {
    let mut previous_end = 0;
    for (index, section) in sections.iter().enumerate() {
        let title = || section.title.clone();
        if section.start < 1 {
            return Err(SectionError::StartsBeforeFirst {
                index,
                title: title(),
                start: section.start,
            });
        }
        if section.start > section.end {
            return Err(SectionError::Inverted {
                index,
                title: title(),
                start: section.start,
                end: section.end,
            });
        }
        if section.end > question_count {
            return Err(SectionError::PastLastQuestion {
                index,
                title: title(),
                end: section.end,
                questions: question_count,
            });
        }
        if index > 0 && section.start <= previous_end {
            return Err(SectionError::Overlap {
                index,
                title: title(),
                start: section.start,
                previous_end,
            });
        }
        previous_end = section.end;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_exam_data() {
        let raw = json!({
            "title": "Quiz",
            "numberOfOptions": 4,
            "correctAnswers": ["A", "B", "C"],
            "numberOfQuestions": 3
        });
        assert!(validate(&raw));
    }

    #[test]
    fn question_count_mismatch_is_invalid() {
        let raw = json!({"title": "T", "correctAnswers": [1, 2, 3], "numberOfQuestions": 4});
        assert!(!validate(&raw));
        let report = validate_exam_data(&raw);
        assert!(report
            .messages()
            .iter()
            .any(|m| m.contains("does not match")));
    }

    #[test]
    fn each_missing_field_is_reported() {
        let report = validate_exam_data(&json!({"title": "Only title"}));
        assert_eq!(report.issues.len(), 2);
        assert!(report
            .messages()
            .contains(&"Missing required field: numberOfOptions".to_string()));
        assert!(report
            .messages()
            .contains(&"Missing required field: correctAnswers".to_string()));
    }

    #[test]
    fn non_array_answers_are_invalid() {
        let raw = json!({"title": "T", "numberOfOptions": 4, "correctAnswers": "ABCD"});
        let report = validate_exam_data(&raw);
        assert_eq!(report.messages(), vec!["correctAnswers must be an array"]);
    }

    #[test]
    fn numbered_answer_key_is_not_an_array() {
        let raw = json!({
            "title": "T",
            "numberOfOptions": 4,
            "correctAnswers": {"1": "A", "3": "C"},
            "numberOfQuestions": 3
        });
        assert!(!validate(&raw));
        assert_eq!(
            validate_exam_data(&raw).messages(),
            vec!["correctAnswers must be an array"]
        );
    }

    #[test]
    fn float_question_count_matches_by_value() {
        let raw = json!({
            "title": "T",
            "numberOfOptions": 4,
            "correctAnswers": ["A", "B", "C"],
            "numberOfQuestions": 3.0
        });
        assert!(validate(&raw));

        let fractional = json!({
            "title": "T",
            "numberOfOptions": 4,
            "correctAnswers": ["A", "B", "C"],
            "numberOfQuestions": 3.5
        });
        assert!(!validate(&fractional));

        let text = json!({
            "title": "T",
            "numberOfOptions": 4,
            "correctAnswers": ["A", "B", "C"],
            "numberOfQuestions": "3"
        });
        assert!(!validate(&text));
    }

    #[test]
    fn sections_are_not_checked_by_raw_validation() {
        let raw = json!({
            "title": "T",
            "numberOfOptions": 4,
            "correctAnswers": ["A"],
            "sections": [{"title": "Bad", "start": 5, "end": 1}]
        });
        assert!(validate(&raw));
    }

    #[test]
    fn validation_is_repeatable() {
        let raw = json!({"title": "T", "correctAnswers": [1, 2, 3], "numberOfQuestions": 4});
        let first = validate_exam_data(&raw);
        for _ in 0..3 {
            assert_eq!(validate_exam_data(&raw), first);
        }
    }

    #[test]
    fn non_object_is_invalid() {
        assert!(!validate(&json!(["A", "B"])));
    }

    #[test]
    fn partition_and_sub_partition_accepted() {
        let full = vec![Section::new("A", 1, 2), Section::new("B", 3, 4)];
        assert!(validate_sections(&full, 4).is_ok());

        let gapped = vec![Section::new("A", 1, 1), Section::new("B", 3, 3)];
        assert!(validate_sections(&gapped, 4).is_ok());

        assert!(validate_sections(&[], 4).is_ok());
    }

    #[test]
    fn malformed_sections_rejected() {
        let overlap = vec![Section::new("A", 1, 3), Section::new("B", 3, 4)];
        assert!(matches!(
            validate_sections(&overlap, 4),
            Err(SectionError::Overlap { index: 1, previous_end: 3, .. })
        ));

        let unordered = vec![Section::new("B", 3, 4), Section::new("A", 1, 2)];
        assert!(matches!(
            validate_sections(&unordered, 4),
            Err(SectionError::Overlap { .. })
        ));

        assert!(matches!(
            validate_sections(&[Section::new("Zero", 0, 2)], 4),
            Err(SectionError::StartsBeforeFirst { .. })
        ));
        assert!(matches!(
            validate_sections(&[Section::new("Inv", 3, 2)], 4),
            Err(SectionError::Inverted { .. })
        ));
        assert!(matches!(
            validate_sections(&[Section::new("Long", 1, 5)], 4),
            Err(SectionError::PastLastQuestion { questions: 4, .. })
        ));
    }
}
