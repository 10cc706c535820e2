//! quizdesk configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::{SessionConfig, DEFAULT_SECONDS_PER_QUESTION};

/// Default name of the configuration file in the working directory.
pub const CONFIG_FILE_NAME: &str = "quizdesk.toml";

/// Environment variable that overrides the admin password.
pub const ADMIN_PASSWORD_ENV: &str = "QUIZDESK_ADMIN_PASSWORD";

/// Errors from locating or parsing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level quizdesk configuration.
///
/// Note: Custom Debug impl masks the admin password.
#[derive(Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// JSON file holding the question pool.
    #[serde(default = "default_questions_file")]
    pub questions_file: PathBuf,
    /// JSON file holding the score history.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
    /// Directory per-user review CSVs are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    /// Shared secret for the admin commands.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    /// Seconds allowed per question.
    #[serde(default = "default_seconds_per_question")]
    pub seconds_per_question: u64,
}

impl std::fmt::Debug for QuizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizConfig")
            .field("questions_file", &self.questions_file)
            .field("history_file", &self.history_file)
            .field("export_dir", &self.export_dir)
            .field("admin_password", &"***")
            .field("seconds_per_question", &self.seconds_per_question)
            .finish()
    }
}

fn default_questions_file() -> PathBuf {
    PathBuf::from("engineering_mcqs.json")
}
fn default_history_file() -> PathBuf {
    PathBuf::from("score_history.json")
}
fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_admin_password() -> String {
    "adminaccess".to_string()
}
fn default_seconds_per_question() -> u64 {
    DEFAULT_SECONDS_PER_QUESTION
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_file: default_questions_file(),
            history_file: default_history_file(),
            export_dir: default_export_dir(),
            admin_password: default_admin_password(),
            seconds_per_question: default_seconds_per_question(),
        }
    }
}

impl QuizConfig {
    /// Engine settings derived from this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seconds_per_question: self.seconds_per_question,
        }
    }

    /// Compare a supplied admin password against the configured one.
    pub fn admin_password_matches(&self, supplied: &str) -> bool {
        self.admin_password == supplied
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizdesk.toml` in the current directory
/// 2. `~/.config/quizdesk/config.toml`
///
/// `QUIZDESK_ADMIN_PASSWORD` overrides the configured admin password.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig, ConfigError> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(ConfigError::NotFound(p.to_path_buf())),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let parsed = toml::from_str::<QuizConfig>(&content)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
            tracing::debug!("loaded config from {}", path.display());
            parsed
        }
        None => QuizConfig::default(),
    };

    Ok(resolve(config, std::env::var(ADMIN_PASSWORD_ENV).ok()))
}

/// Expand `${VAR}` references in file values, then apply the password override verbatim.
fn resolve(mut config: QuizConfig, password_override: Option<String>) -> QuizConfig {
    config.questions_file = resolve_path(&config.questions_file);
    config.history_file = resolve_path(&config.history_file);
    config.export_dir = resolve_path(&config.export_dir);
    config.admin_password = match password_override {
        Some(password) => password,
        None => resolve_env_vars(&config.admin_password),
    };
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdesk"))
}
