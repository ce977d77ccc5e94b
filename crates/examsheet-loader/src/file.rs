//! Exam data from a local JSON or TOML file.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use examsheet_core::parser::{parse_raw, ExamFormat};

use crate::error::LoadError;
use crate::source::ExamSource;

/// Reads an exam file; the extension picks the format, defaulting to JSON.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ExamSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load_raw(&self) -> Result<Value, LoadError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let format = ExamFormat::from_path(&self.path).unwrap_or(ExamFormat::Json);
        parse_raw(&content, format).map_err(|e| LoadError::Parse(e.to_string()))
    }
}
