//! Exam data embedded in an HTML page.
//!
//! A page may carry its exam in a script block such as
//! `const examData = { ... };`. Only scripts mentioning both `examData` and
//! `correctAnswers` are considered.

use std::path::PathBuf;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::error::LoadError;
use crate::source::ExamSource;

const SCRIPT_PATTERN: &str = r"(?is)<script[^>]*>(.*?)</script>";
const EXAM_DATA_PATTERN: &str = r"const examData = (\{[\s\S]*?\});";

/// Find and parse the first embedded `examData` object in a page.
///
/// A page without `<script>` tags is searched as a single script. Candidates
/// that fail to parse are skipped with a warning.
pub fn extract_embedded_exam_data(page: &str) -> Result<Option<Value>, LoadError> {
    let scripts = Regex::new(SCRIPT_PATTERN)?;
    let exam_data = Regex::new(EXAM_DATA_PATTERN)?;

    let mut bodies: Vec<&str> = scripts
        .captures_iter(page)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect();
    if bodies.is_empty() {
        bodies.push(page);
    }

    for body in bodies {
        if !(body.contains("examData") && body.contains("correctAnswers")) {
            continue;
        }
        let Some(found) = exam_data.captures(body).and_then(|c| c.get(1)) else {
            continue;
        };
        match serde_json::from_str(found.as_str()) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => tracing::warn!("could not parse embedded exam data: {e}"),
        }
    }

    Ok(None)
}

#[derive(Debug, Clone)]
enum Page {
    Text(String),
    File(PathBuf),
}

/// Reads exam data embedded in a page.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    page: Page,
}

impl EmbeddedSource {
    /// Use page markup already in memory.
    pub fn from_page(html: impl Into<String>) -> Self {
        Self {
            page: Page::Text(html.into()),
        }
    }

    /// Read the page from disk when loading.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            page: Page::File(path.into()),
        }
    }
}

#[async_trait]
impl ExamSource for EmbeddedSource {
    fn describe(&self) -> String {
        match &self.page {
            Page::Text(_) => "embedded page".to_string(),
            Page::File(path) => path.display().to_string(),
        }
    }

    async fn load_raw(&self) -> Result<Value, LoadError> {
        let found = match &self.page {
            Page::Text(html) => extract_embedded_exam_data(html)?,
            Page::File(path) => {
                let html = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.clone(),
                        source,
                    })?;
                extract_embedded_exam_data(&html)?
            }
        };
        found.ok_or_else(|| LoadError::NotEmbedded(self.describe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<script src="app.js"></script>
<script>
    const settings = { theme: "light" };
</script>
<script type="module">
    const examData = {"title": "Embebido", "numberOfOptions": 3, "correctAnswers": ["A", "C"], "sections": [{"title": "S", "start": 1, "end": 2}]};
    generateExamSheet(examData);
</script>
</head>
<body></body>
</html>"#;

    #[test]
    fn extracts_exam_data_from_script() {
        let value = extract_embedded_exam_data(PAGE).unwrap().unwrap();
        assert_eq!(value["title"], "Embebido");
        assert_eq!(value["correctAnswers"][1], "C");
        assert_eq!(value["sections"][0]["end"], 2);
    }

    #[test]
    fn page_without_exam_data() {
        let page = "<html><script>const other = {};</script></html>";
        assert!(extract_embedded_exam_data(page).unwrap().is_none());
    }

    #[test]
    fn unparseable_candidate_is_skipped() {
        let page = r#"<script>const examData = {title: 'unquoted', correctAnswers: []};</script>
<script>const examData = {"title": "Second", "numberOfOptions": 4, "correctAnswers": ["B"]};</script>"#;
        let value = extract_embedded_exam_data(page).unwrap().unwrap();
        assert_eq!(value["title"], "Second");
    }

    #[test]
    fn bare_script_text_is_searched() {
        let js = r#"const examData = {"title": "JS", "numberOfOptions": 4, "correctAnswers": ["D"]};"#;
        let value = extract_embedded_exam_data(js).unwrap().unwrap();
        assert_eq!(value["correctAnswers"][0], "D");
    }

    #[tokio::test]
    async fn source_reports_missing_data() {
        let source = EmbeddedSource::from_page("<html></html>");
        let err = source.load_raw().await.unwrap_err();
        assert!(matches!(err, LoadError::NotEmbedded(_)));
    }

    #[tokio::test]
    async fn source_reads_page_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exam.html");
        std::fs::write(&path, PAGE).unwrap();

        let value = EmbeddedSource::from_file(&path).load_raw().await.unwrap();
        assert_eq!(value["numberOfOptions"], 3);
    }
}
