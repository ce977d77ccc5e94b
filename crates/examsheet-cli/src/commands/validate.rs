//! The `examsheet validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use examsheet_core::config::{load_config_from, ExamsheetConfig};
use examsheet_core::parser::normalize_with;
use examsheet_core::validation::{validate_exam_data, validate_sections};
use examsheet_loader::source_for;

const EXAM_EXTENSIONS: [&str; 4] = ["json", "toml", "html", "htm"];

pub async fn execute(exam: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let locations = if Path::new(&exam).is_dir() {
        exam_files(Path::new(&exam))?
    } else {
        vec![exam]
    };

    let mut invalid = 0;
    for location in &locations {
        if !validate_one(location, &config).await? {
            invalid += 1;
        }
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} invalid exam(s)");
    }
    println!("All exams valid.");
    Ok(())
}

fn exam_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| EXAM_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

/// Print diagnostics for one exam; `Ok(false)` when it has problems.
///
/// A file that cannot be read or parsed counts as invalid so the rest of a
/// directory is still checked.
async fn validate_one(location: &str, config: &ExamsheetConfig) -> Result<bool> {
    println!("Exam: {location}");

    let loaded = match source_for(location, config) {
        Ok(source) => source.load_raw().await,
        Err(e) => Err(e),
    };
    let raw = match loaded {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("failed to load {location}: {e}");
            println!("  ERROR: {e}");
            return Ok(false);
        }
    };

    let report = validate_exam_data(&raw);
    for message in report.messages() {
        println!("  ERROR: {message}");
    }
    if !report.is_valid() {
        return Ok(false);
    }

    let exam = match normalize_with(&raw, config.default_options) {
        Ok(exam) => exam,
        Err(e) => {
            println!("  ERROR: {e}");
            return Ok(false);
        }
    };

    println!(
        "  {}: {} questions, {} options",
        exam.title,
        exam.question_count(),
        exam.number_of_options
    );
    for section in &exam.sections {
        println!(
            "    {} ({}-{}, {} questions)",
            section.title,
            section.start,
            section.end,
            section.question_count()
        );
    }

    if let Err(e) = validate_sections(&exam.sections, exam.question_count()) {
        println!("  ERROR: {e}");
        return Ok(false);
    }

    Ok(true)
}
