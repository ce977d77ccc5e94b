//! The `examsheet convert` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use examsheet_core::config::load_config_from;
use examsheet_core::parser::{to_format, ExamFormat};
use examsheet_loader::load_exam;

pub async fn execute(input: String, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format = ExamFormat::from_path(&output).with_context(|| {
        format!(
            "cannot infer format from {}; use a .json or .toml extension",
            output.display()
        )
    })?;

    let exam = load_exam(&input, &config)
        .await
        .with_context(|| format!("failed to load {input}"))?;

    let content = to_format(&exam, format)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Converted {input} -> {}", output.display());
    Ok(())
}
