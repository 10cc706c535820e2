//! The `quizdesk export` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdesk_core::history::HistoryStore;
use quizdesk_report::csv::{write_history_csv, HISTORY_EXPORT_FILE};

pub fn execute(password: String, output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::authorize(&password, config_path)?;
    let history = HistoryStore::open(&config.history_file)?;

    let path = output.unwrap_or_else(|| config.export_dir.join(HISTORY_EXPORT_FILE));
    write_history_csv(&path, history.records())?;

    println!("Exported {} records to {}", history.len(), path.display());
    Ok(())
}
