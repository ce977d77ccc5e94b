//! examsheet configuration and UI message strings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_OPTIONS;

/// Top-level examsheet configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamsheetConfig {
    /// Options per question for exams that omit `numberOfOptions`.
    #[serde(default = "default_options")]
    pub default_options: u8,
    /// HTTP timeout when fetching exam data.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// Prefix for relative exam paths that are not found on disk.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Literal strings shown to the test-taker.
    #[serde(default)]
    pub messages: Messages,
}

fn default_options() -> u8 {
    DEFAULT_OPTIONS
}
fn default_timeout() -> u64 {
    30
}

impl Default for ExamsheetConfig {
    fn default() -> Self {
        Self {
            default_options: default_options(),
            request_timeout_secs: default_timeout(),
            base_url: None,
            messages: Messages::default(),
        }
    }
}

/// UI strings. Defaults are the original Spanish wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub enter_name: String,
    pub answer_all: String,
    pub score_total: String,
    pub score_of: String,
    pub score_by_subject: String,
    pub return_label: String,
    pub grade_label: String,
    pub name_placeholder: String,
    pub load_error_title: String,
    pub load_error_body: String,
    pub load_error_details: String,
    pub retry: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            enter_name: "Por favor, ingresa tu nombre antes de calificar.".into(),
            answer_all: "Por favor, responde todas las preguntas antes de calificar.".into(),
            score_total: "Puntaje total:".into(),
            score_of: "de".into(),
            score_by_subject: "Puntaje por materia:".into(),
            return_label: "Regresar".into(),
            grade_label: "Calificar".into(),
            name_placeholder: "Ingresa tu nombre".into(),
            load_error_title: "Error al cargar el examen".into(),
            load_error_body: "No se pudo cargar la información del examen. Por favor, verifica que el archivo de configuración esté disponible e intenta nuevamente.".into(),
            load_error_details: "Detalles del error:".into(),
            retry: "Reintentar".into(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned. An unclosed
/// `${` is kept as written.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examsheet.toml` in the current directory
/// 2. `~/.config/examsheet/config.toml`
///
/// Environment variable override: `EXAMSHEET_BASE_URL`.
pub fn load_config() -> Result<ExamsheetConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamsheetConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("examsheet.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ExamsheetConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ExamsheetConfig::default(),
    };

    if let Ok(url) = std::env::var("EXAMSHEET_BASE_URL") {
        config.base_url = Some(url);
    }
    config.base_url = config.base_url.as_deref().map(resolve_env_vars);

    anyhow::ensure!(
        (1..=5).contains(&config.default_options),
        "default_options must be between 1 and 5"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examsheet"))
}
