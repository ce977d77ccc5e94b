//! Exam data fetched over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use examsheet_core::parser::{parse_raw, ExamFormat};

use crate::error::LoadError;
use crate::source::ExamSource;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches an exam document. No retries; failures surface to the caller.
pub struct HttpSource {
    url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, LoadError> {
        let timeout_secs = if timeout_secs == 0 {
            DEFAULT_TIMEOUT_SECS
        } else {
            timeout_secs
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LoadError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            timeout_secs,
            client,
        })
    }
}

/// TOML when the URL path ends in `.toml`, JSON otherwise.
fn format_for_url(url: &str) -> ExamFormat {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if path.to_ascii_lowercase().ends_with(".toml") {
        ExamFormat::Toml
    } else {
        ExamFormat::Json
    }
}

#[async_trait]
impl ExamSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn load_raw(&self) -> Result<Value, LoadError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(self.timeout_secs)
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Http {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        tracing::debug!(bytes = body.len(), "fetched exam data");

        parse_raw(&body, format_for_url(&self.url)).map_err(|e| LoadError::Parse(e.to_string()))
    }
}
