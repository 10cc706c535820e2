//! CSV exports of a session review and of the full score history.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizdesk_core::model::{HistoryRecord, ReviewEntry};

/// Header row of a review export.
pub const REVIEW_HEADER: [&str; 4] = ["Question", "Your Answer", "Correct Answer", "Status"];

/// Header row of a history export.
pub const HISTORY_HEADER: [&str; 5] = ["User", "Score", "Total", "Time", "Date"];

/// Default file name of the full history export.
pub const HISTORY_EXPORT_FILE: &str = "full_score_history.csv";

/// Status cell for a review row.
pub fn status_mark(correct: bool) -> &'static str {
    if correct {
        "✅"
    } else {
        "❌"
    }
}

/// Render review entries as CSV, one row per entry in order.
pub fn export_review(entries: &[ReviewEntry]) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(REVIEW_HEADER)?;
    for entry in entries {
        writer.write_record([
            entry.question.as_str(),
            entry.selected.as_str(),
            entry.correct.as_str(),
            status_mark(entry.status),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush review CSV: {}", e.error()))
}

/// Render history records as CSV, one row per record in order.
pub fn export_history(records: &[HistoryRecord]) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(HISTORY_HEADER)?;
    for record in records {
        writer.write_record([
            record.user.clone(),
            record.score.to_string(),
            record.total.to_string(),
            record.time_secs.to_string(),
            record.date.clone(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush history CSV: {}", e.error()))
}

/// File name of a user's review export.
pub fn review_file_name(username: &str) -> String {
    let safe: String = username
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{safe}_result.csv")
}

/// Write `{username}_result.csv` into `dir` and return its path.
pub fn write_review_csv(dir: &Path, username: &str, entries: &[ReviewEntry]) -> Result<PathBuf> {
    let bytes = export_review(entries)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(review_file_name(username));
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write review to {}", path.display()))?;
    tracing::info!("review exported to {}", path.display());
    Ok(path)
}

/// Write the full history export to `path`.
pub fn write_history_csv(path: &Path, records: &[HistoryRecord]) -> Result<()> {
    let bytes = export_history(records)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write history export to {}", path.display()))?;
    tracing::info!("{} history records exported to {}", records.len(), path.display());
    Ok(())
}
