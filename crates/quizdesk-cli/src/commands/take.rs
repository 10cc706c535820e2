//! The `quizdesk take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdesk_core::clock::Clock;
use quizdesk_core::config::{load_config_from, QuizConfig};
use quizdesk_core::history::HistoryStore;
use quizdesk_core::model::{QuestionCount, OPTION_COUNT};
use quizdesk_core::pool::QuestionStore;
use quizdesk_core::session::{ScoredSession, Session, SessionEngine, SessionOutcome};
use quizdesk_report::csv::{status_mark, write_review_csv};

pub fn execute(user: Option<String>, count: QuestionCount, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!("using {config:?}");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    run(&config, user, count, Clock::System, &mut input, &mut out)
}

/// Drive one test over the given input and output streams.
pub fn run<R: BufRead, W: Write>(
    config: &QuizConfig,
    user: Option<String>,
    count: QuestionCount,
    clock: Clock,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let pool = QuestionStore::new(&config.questions_file)
        .load()
        .context("failed to load question pool")?;
    let mut history = HistoryStore::open(&config.history_file)?;

    let username = match user {
        Some(name) => name,
        None => {
            write!(out, "Enter your name to begin: ")?;
            out.flush()?;
            read_line(input)?.unwrap_or_default()
        }
    };
    let username = username.trim();

    let engine = SessionEngine::new(pool, clock, config.session_config());
    let mut session = engine.start(username, count)?;

    writeln!(
        out,
        "Starting test for {}: {} questions, {}s time limit.",
        session.username(),
        session.count(),
        session.time_limit_secs()
    )?;

    ask_questions(&mut session, input, out)?;

    writeln!(out, "\nTest completed.")?;
    match engine.submit(session) {
        SessionOutcome::TimedOut {
            elapsed_secs,
            limit_secs,
            ..
        } => {
            writeln!(
                out,
                "Time exceeded! Limit was {limit_secs}s, you took {elapsed_secs}s."
            )?;
        }
        SessionOutcome::Scored(scored) => {
            writeln!(out, "{} scored {}/{}", scored.username, scored.score, scored.total)?;
            writeln!(out, "Time taken: {} seconds", scored.elapsed_secs)?;

            history.append(scored.to_history_record())?;
            print_review(&scored, out)?;

            let path = write_review_csv(&config.export_dir, &scored.username, &scored.review)?;
            writeln!(out, "Result saved to: {}", path.display())?;
        }
    }

    Ok(())
}

/// Ask every question in order. EOF stops asking; the rest stay unanswered.
fn ask_questions<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let questions = session.questions().to_vec();
    for (idx, question) in questions.iter().enumerate() {
        writeln!(out, "\nQ{}: {}", idx + 1, question.text())?;
        for (k, option) in question.options().iter().enumerate() {
            writeln!(out, "  {}) {}", k + 1, option)?;
        }

        loop {
            write!(out, "Your answer [1-{OPTION_COUNT}, Enter to skip]: ")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                writeln!(out)?;
                return Ok(());
            };
            let choice = line.trim();
            if choice.is_empty() {
                break;
            }
            match choice.parse::<usize>() {
                Ok(k) if (1..=OPTION_COUNT).contains(&k) => {
                    session.record_response(idx, question.options()[k - 1].clone())?;
                    break;
                }
                _ => writeln!(out, "Please enter a number from 1 to {OPTION_COUNT}.")?,
            }
        }
    }
    Ok(())
}

fn print_review<W: Write>(scored: &ScoredSession, out: &mut W) -> Result<()> {
    writeln!(out, "\nReview:")?;
    for entry in &scored.review {
        writeln!(out, "{} {}", status_mark(entry.status), entry.question)?;
        writeln!(out, "  - Your answer: {}", entry.selected)?;
        writeln!(out, "  - Correct answer: {}", entry.correct)?;
    }
    Ok(())
}

/// Read one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    Ok((n > 0).then_some(line))
}
