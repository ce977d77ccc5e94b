//! The `examsheet render` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examsheet_core::config::load_config_from;
use examsheet_loader::load_exam;
use examsheet_report::{render_exam_sheet, render_load_error, write_html};

/// Write a blank answer sheet, or the load-error page when the exam cannot
/// be loaded.
pub async fn execute(exam: String, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    match load_exam(&exam, &config).await {
        Ok(definition) => {
            write_html(&render_exam_sheet(&definition, &config.messages), &output)?;
            println!(
                "Rendered {} ({} questions) to {}",
                definition.title,
                definition.question_count(),
                output.display()
            );
            Ok(())
        }
        Err(e) => {
            write_html(&render_load_error(&e, &config.messages), &output)?;
            eprintln!("Error page: {}", output.display());
            Err(e).with_context(|| format!("failed to load {exam}"))
        }
    }
}
