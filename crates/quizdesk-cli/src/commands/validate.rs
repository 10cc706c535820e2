//! The `quizdesk validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizdesk_core::config::load_config_from;
use quizdesk_core::model::QuestionCount;
use quizdesk_core::pool::QuestionPool;

pub fn execute(questions: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let path = match questions {
        Some(p) => p,
        None => load_config_from(config_path.as_deref())?.questions_file,
    };

    let pool = QuestionPool::load(&path)?;

    println!("Question pool: {}", path.display());
    println!("  {} valid questions", pool.len());
    if pool.dropped() > 0 {
        println!("  {} skipped (need 4 distinct options and an answer among them)", pool.dropped());
    }

    let supported: Vec<String> = QuestionCount::ALLOWED
        .iter()
        .filter(|&&n| n as usize <= pool.len())
        .map(u32::to_string)
        .collect();
    if supported.is_empty() {
        println!(
            "Not enough questions for a test (minimum {}).",
            QuestionCount::ALLOWED[0]
        );
    } else {
        println!("Test sizes available: {}", supported.join(", "));
    }

    Ok(())
}
