//! examsheet-loader — obtaining exam definitions.
//!
//! Exam data can come from a `const examData = {...}` block embedded in an
//! HTML page, from a local JSON/TOML file, or over HTTP. Every source yields
//! a raw document that is validated and normalized the same way.

pub mod embedded;
pub mod error;
pub mod file;
pub mod http;
pub mod memory;
pub mod source;

use examsheet_core::config::ExamsheetConfig;
use examsheet_core::model::ExamDefinition;
use examsheet_core::parser::normalize_with;
use examsheet_core::validation::validate_exam_data;

pub use embedded::{extract_embedded_exam_data, EmbeddedSource};
pub use error::LoadError;
pub use file::FileSource;
pub use http::HttpSource;
pub use memory::MemorySource;
pub use source::{source_for, EmbeddedOrFetch, ExamSource};

/// Load, validate and normalize an exam from a source.
///
/// Validation problems are logged one by one and returned together as
/// [`LoadError::Invalid`].
pub async fn load_definition(
    source: &dyn ExamSource,
    default_options: u8,
) -> Result<ExamDefinition, LoadError> {
    let raw = source.load_raw().await?;

    let report = validate_exam_data(&raw);
    if !report.is_valid() {
        for message in report.messages() {
            tracing::error!(source = %source.describe(), "{message}");
        }
        return Err(LoadError::Invalid(report.messages()));
    }

    let exam = normalize_with(&raw, default_options)?;
    tracing::info!(
        source = %source.describe(),
        title = %exam.title,
        questions = exam.question_count(),
        sections = exam.sections.len(),
        "loaded exam"
    );
    Ok(exam)
}

/// Resolve a location with [`source_for`] and load it.
pub async fn load_exam(
    location: &str,
    config: &ExamsheetConfig,
) -> Result<ExamDefinition, LoadError> {
    let source = source_for(location, config)?;
    load_definition(source.as_ref(), config.default_options).await
}
