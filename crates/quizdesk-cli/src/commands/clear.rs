//! The `quizdesk clear` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdesk_core::history::HistoryStore;

pub fn execute(password: String, yes: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::authorize(&password, config_path)?;
    anyhow::ensure!(
        yes,
        "clearing history cannot be undone; pass --yes to confirm"
    );

    match HistoryStore::clear_path(&config.history_file)? {
        Some(removed) => {
            println!("All score history has been cleared ({removed} records removed).")
        }
        None => println!("All score history has been cleared (previous file was unreadable)."),
    }
    Ok(())
}
