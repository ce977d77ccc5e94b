//! Exam file parsing, normalization, and format conversion.
//!
//! Exams are read from JSON or TOML into a raw [`serde_json::Value`], checked
//! with [`validate_exam_data`](crate::validation::validate_exam_data), and
//! normalized into an [`ExamDefinition`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExamError;
use crate::model::{ExamDefinition, Section, DEFAULT_OPTIONS, OPTION_LETTERS};

/// Answer used for question numbers missing from a numbered answer key.
const MISSING_ANSWER_FILL: &str = "A";

/// Highest question number accepted in a numbered answer key.
pub const MAX_NUMBERED_QUESTION: usize = 10_000;

/// On-disk exam formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamFormat {
    Json,
    Toml,
}

impl ExamFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(ExamFormat::Json),
            "toml" => Some(ExamFormat::Toml),
            _ => None,
        }
    }
}

/// Intermediate structure for normalizing raw exam data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExam {
    title: String,
    #[serde(default)]
    number_of_options: Option<u64>,
    correct_answers: Vec<RawAnswer>,
    #[serde(default)]
    sections: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Text(String),
    Number(serde_json::Number),
}

impl RawAnswer {
    fn into_token(self) -> String {
        match self {
            RawAnswer::Text(s) => s,
            RawAnswer::Number(n) => n.to_string(),
        }
    }
}

/// Parse source text into raw exam data.
///
/// JSON is returned as written. TOML may carry a numbered `[correctAnswers]`
/// table, which is expanded to an array here so validation only ever sees
/// the array form.
pub fn parse_raw(content: &str, format: ExamFormat) -> Result<Value, ExamError> {
    match format {
        ExamFormat::Json => {
            serde_json::from_str(content).map_err(|e| ExamError::Syntax(e.to_string()))
        }
        ExamFormat::Toml => {
            let mut raw =
                toml::from_str::<Value>(content).map_err(|e| ExamError::Syntax(e.to_string()))?;
            expand_numbered_key(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Rewrite a numbered answer key (`1 = "A"`, `3 = "C"`) as an array of length
/// `max(number)`, filling missing numbers with `"A"`.
///
/// Numbers must lie in `1..=MAX_NUMBERED_QUESTION`. Any other `correctAnswers`
/// value is left untouched.
pub fn expand_numbered_key(raw: &mut Value) -> Result<(), ExamError> {
    let Some(slot) = raw.get_mut("correctAnswers") else {
        return Ok(());
    };
    let Value::Object(numbered) = &mut *slot else {
        return Ok(());
    };
    let numbered = std::mem::take(numbered);

    let mut by_number = BTreeMap::new();
    for (key, answer) in numbered {
        let Some(number) = key
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=MAX_NUMBERED_QUESTION).contains(n))
        else {
            return Err(ExamError::InvalidQuestionNumber(key));
        };
        by_number.insert(number, answer);
    }

    let max = by_number.keys().next_back().copied().unwrap_or(0);
    let missing: Vec<usize> = (1..=max).filter(|n| !by_number.contains_key(n)).collect();
    if !missing.is_empty() {
        tracing::warn!(
            count = missing.len(),
            "questions {missing:?} missing from answer key, using {MISSING_ANSWER_FILL}"
        );
    }

    let answers = (1..=max)
        .map(|n| {
            by_number
                .remove(&n)
                .unwrap_or_else(|| Value::String(MISSING_ANSWER_FILL.to_string()))
        })
        .collect();
    *slot = Value::Array(answers);
    Ok(())
}

/// Normalize raw exam data, defaulting `numberOfOptions` to 4.
pub fn normalize(raw: &Value) -> Result<ExamDefinition, ExamError> {
    normalize_with(raw, DEFAULT_OPTIONS)
}

/// Normalize raw exam data with an explicit default option count.
///
/// `correctAnswers` must be an array; `sections` that is present but not an
/// array is treated as absent.
pub fn normalize_with(raw: &Value, default_options: u8) -> Result<ExamDefinition, ExamError> {
    let parsed = RawExam::deserialize(raw).map_err(|e| ExamError::Malformed(e.to_string()))?;

    let number_of_options = match parsed.number_of_options {
        None => default_options,
        Some(n) if (1..=OPTION_LETTERS.len() as u64).contains(&n) => n as u8,
        Some(n) => return Err(ExamError::OptionCountOutOfRange(n)),
    };

    let correct_answers = parsed
        .correct_answers
        .into_iter()
        .map(RawAnswer::into_token)
        .collect();

    let sections = match parsed.sections {
        None | Some(Value::Null) => Vec::new(),
        Some(value @ Value::Array(_)) => Vec::<Section>::deserialize(value)
            .map_err(|e| ExamError::Malformed(format!("sections: {e}")))?,
        Some(other) => {
            tracing::warn!("ignoring sections: expected an array, found {other}");
            Vec::new()
        }
    };

    Ok(ExamDefinition {
        title: parsed.title,
        number_of_options,
        correct_answers,
        sections,
    })
}

/// TOML layout with the numbered answer key, easier to edit by hand.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NumberedExam<'a> {
    title: &'a str,
    number_of_options: u8,
    correct_answers: BTreeMap<String, &'a str>,
    #[serde(skip_serializing_if = "no_sections")]
    sections: &'a [Section],
}

fn no_sections(sections: &&[Section]) -> bool {
    sections.is_empty()
}

/// Serialize an exam as pretty JSON with an array answer key.
pub fn to_json(exam: &ExamDefinition) -> Result<String> {
    serde_json::to_string_pretty(exam).context("failed to serialize exam as JSON")
}

/// Serialize an exam as TOML with a numbered answer key.
pub fn to_numbered_toml(exam: &ExamDefinition) -> Result<String> {
    let numbered = NumberedExam {
        title: &exam.title,
        number_of_options: exam.number_of_options,
        correct_answers: exam
            .correct_answers
            .iter()
            .enumerate()
            .map(|(i, a)| ((i + 1).to_string(), a.as_str()))
            .collect(),
        sections: &exam.sections,
    };
    toml::to_string(&numbered).context("failed to serialize exam as TOML")
}

/// Serialize an exam in the given format.
pub fn to_format(exam: &ExamDefinition, format: ExamFormat) -> Result<String> {
    match format {
        ExamFormat::Json => to_json(exam),
        ExamFormat::Toml => to_numbered_toml(exam),
    }
}
