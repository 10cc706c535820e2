//! The `quizdesk history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizdesk_core::history::HistoryStore;

pub fn execute(
    password: String,
    filter: Option<String>,
    limit: usize,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::authorize(&password, config_path)?;
    let history = HistoryStore::open(&config.history_file)?;

    let records = history.recent(filter.as_deref(), limit);
    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "User", "Score", "Time"]);
    for record in &records {
        table.add_row(vec![
            Cell::new(&record.date),
            Cell::new(&record.user),
            Cell::new(format!("{}/{}", record.score, record.total)),
            Cell::new(format!("{}s", record.time_secs)),
        ]);
    }

    println!("Score history ({} of {} records)", records.len(), history.len());
    println!("{table}");

    Ok(())
}
