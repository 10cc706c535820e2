pub mod clear;
pub mod export;
pub mod history;
pub mod init;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizdesk_core::config::{load_config_from, QuizConfig};

/// Load the config, then check the admin password against it.
pub fn authorize(password: &str, config_path: Option<PathBuf>) -> Result<QuizConfig> {
    let config = load_config_from(config_path.as_deref())?;
    anyhow::ensure!(
        config.admin_password_matches(password),
        "invalid admin password"
    );
    tracing::debug!("admin access granted");
    Ok(config)
}
