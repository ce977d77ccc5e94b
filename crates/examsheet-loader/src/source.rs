//! The `ExamSource` trait and source selection.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use examsheet_core::config::ExamsheetConfig;

use crate::embedded::EmbeddedSource;
use crate::error::LoadError;
use crate::file::FileSource;
use crate::http::HttpSource;

/// Somewhere raw exam data can be loaded from.
///
/// Implementations return the document as parsed JSON; validation and
/// normalization happen in [`crate::load_definition`].
#[async_trait]
pub trait ExamSource: Send + Sync {
    /// Human-readable location, used in logs and error pages.
    fn describe(&self) -> String;

    /// Load the raw exam document.
    async fn load_raw(&self) -> Result<Value, LoadError>;
}

/// Try a page's embedded data first, then a fallback source.
///
/// Only a missing `examData` object triggers the fallback. Any other failure
/// of the embedded source is returned as is.
pub struct EmbeddedOrFetch {
    embedded: EmbeddedSource,
    fallback: Box<dyn ExamSource>,
}

impl EmbeddedOrFetch {
    pub fn new(embedded: EmbeddedSource, fallback: Box<dyn ExamSource>) -> Self {
        Self { embedded, fallback }
    }
}

#[async_trait]
impl ExamSource for EmbeddedOrFetch {
    fn describe(&self) -> String {
        format!("{} (or {})", self.embedded.describe(), self.fallback.describe())
    }

    async fn load_raw(&self) -> Result<Value, LoadError> {
        match self.embedded.load_raw().await {
            Err(LoadError::NotEmbedded(page)) => {
                tracing::debug!(
                    page = %page,
                    fallback = %self.fallback.describe(),
                    "no embedded exam data, fetching"
                );
                self.fallback.load_raw().await
            }
            other => other,
        }
    }
}

fn is_url(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn join_url(base: &str, location: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        location.trim_start_matches("./").trim_start_matches('/')
    )
}

/// Pick a source for a location given on the command line.
///
/// - `http://` and `https://` locations are fetched.
/// - A relative path that does not exist locally is fetched from
///   `base_url` when one is configured.
/// - `.html`/`.htm` pages use their embedded data, falling back to the
///   sibling `.json` file.
/// - Anything else is read as a JSON or TOML file.
pub fn source_for(
    location: &str,
    config: &ExamsheetConfig,
) -> Result<Box<dyn ExamSource>, LoadError> {
    if is_url(location) {
        return Ok(Box::new(HttpSource::new(
            location,
            config.request_timeout_secs,
        )?));
    }

    let path = Path::new(location);
    if !path.exists() && path.is_relative() {
        if let Some(base) = &config.base_url {
            let url = join_url(base, location);
            tracing::debug!(url = %url, "resolving exam against base URL");
            return Ok(Box::new(HttpSource::new(url, config.request_timeout_secs)?));
        }
    }

    let is_page = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
    if is_page {
        return Ok(Box::new(EmbeddedOrFetch::new(
            EmbeddedSource::from_file(path),
            Box::new(FileSource::new(path.with_extension("json"))),
        )));
    }

    Ok(Box::new(FileSource::new(path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use serde_json::json;

    #[tokio::test]
    async fn embedded_data_wins() {
        let page = r#"<script>const examData = {"title": "Page", "numberOfOptions": 4, "correctAnswers": ["A"]};</script>"#;
        let fallback = MemorySource::new(json!({"title": "Fetched"}));
        let source = EmbeddedOrFetch::new(EmbeddedSource::from_page(page), Box::new(fallback));

        let value = source.load_raw().await.unwrap();
        assert_eq!(value["title"], "Page");
    }

    #[tokio::test]
    async fn falls_back_when_not_embedded() {
        let fallback = MemorySource::new(json!({"title": "Fetched"}));
        let source = EmbeddedOrFetch::new(
            EmbeddedSource::from_page("<html></html>"),
            Box::new(fallback),
        );

        let value = source.load_raw().await.unwrap();
        assert_eq!(value["title"], "Fetched");
    }

    #[tokio::test]
    async fn unreadable_page_does_not_fall_back() {
        let fallback = MemorySource::new(json!({"title": "Fetched"}));
        let source = EmbeddedOrFetch::new(
            EmbeddedSource::from_file("/no/such/page.html"),
            Box::new(fallback),
        );

        let err = source.load_raw().await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(join_url("https://x/exams/", "./a.json"), "https://x/exams/a.json");
        assert_eq!(join_url("https://x", "a.json"), "https://x/a.json");
    }

    #[test]
    fn picks_source_by_location() {
        let config = ExamsheetConfig::default();

        let source = source_for("https://example.com/exam.json", &config).unwrap();
        assert_eq!(source.describe(), "https://example.com/exam.json");

        let source = source_for("exams/page.html", &config).unwrap();
        assert_eq!(source.describe(), "exams/page.html (or exams/page.json)");

        let source = source_for("exams/sample.toml", &config).unwrap();
        assert_eq!(source.describe(), "exams/sample.toml");
    }

    #[test]
    fn missing_relative_path_uses_base_url() {
        let config = ExamsheetConfig {
            base_url: Some("https://exams.example.com/".into()),
            ..Default::default()
        };
        let source = source_for("no-such-dir/final.json", &config).unwrap();
        assert_eq!(
            source.describe(),
            "https://exams.example.com/no-such-dir/final.json"
        );
    }
}
