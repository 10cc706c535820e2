//! End-to-end quiz flows: pool file -> session -> history file.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use quizdesk_core::clock::Clock;
use quizdesk_core::history::HistoryStore;
use quizdesk_core::model::QuestionCount;
use quizdesk_core::pool::QuestionStore;
use quizdesk_core::session::{SessionConfig, SessionEngine, SessionOutcome};
use quizdesk_core::QuizError;

const FIVE_QUESTIONS: &str = r#"[
    {"question": "Which chart shows task schedules?", "options": ["Gantt", "Pareto", "Fishbone", "Scatter"], "answer": "Gantt"},
    {"question": "PERT stands for Program Evaluation and ... Technique", "options": ["Review", "Report", "Return", "Reform"], "answer": "Review"},
    {"question": "Critical path has how much float?", "options": ["Zero", "One day", "Maximum", "Negative"], "answer": "Zero"},
    {"question": "Which is a quality management tool?", "options": ["Control chart", "Ledger", "Invoice", "Payslip"], "answer": "Control chart"},
    {"question": "Break-even point is where revenue equals", "options": ["Total cost", "Profit", "Tax", "Fixed cost only"], "answer": "Total cost"}
]"#;

const THREE_VALID: &str = r#"[
    {"question": "q1", "options": ["a", "b", "c", "d"], "answer": "a"},
    {"question": "q2", "options": ["a", "b", "c", "d"], "answer": "b"},
    {"question": "q3", "options": ["a", "b", "c", "d"], "answer": "c"},
    {"question": "broken", "options": ["a", "b"], "answer": "a"}
]"#;

fn engine_for(pool_json: &str, dir: &Path) -> anyhow::Result<SessionEngine> {
    let path = dir.join("questions.json");
    std::fs::write(&path, pool_json)?;
    let pool = QuestionStore::new(&path).load()?;
    let start = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    Ok(SessionEngine::new(
        pool,
        Clock::fixed(start),
        SessionConfig::default(),
    ))
}

#[test]
fn perfect_score_is_recorded() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = engine_for(FIVE_QUESTIONS, dir.path())?;
    let mut history = HistoryStore::open(dir.path().join("score_history.json"))?;

    let mut session = engine.start("alice", QuestionCount::new(5)?)?;
    let answers: Vec<String> = session
        .questions()
        .iter()
        .map(|q| q.answer().to_string())
        .collect();
    for (i, answer) in answers.into_iter().enumerate() {
        session.record_response(i, answer)?;
    }
    engine.clock_mut().advance(Duration::seconds(120));

    let SessionOutcome::Scored(scored) = engine.submit(session) else {
        panic!("session should be scored");
    };
    assert_eq!(scored.score, 5);
    assert!(scored.review.iter().all(|r| r.status));

    history.append(scored.to_history_record())?;

    let reopened = HistoryStore::open(history.path())?;
    assert_eq!(reopened.len(), 1);
    let record = &reopened.records()[0];
    assert_eq!(record.user, "alice");
    assert_eq!(record.score, 5);
    assert_eq!(record.total, 5);
    assert_eq!(record.time_secs, 120);
    Ok(())
}

#[test]
fn empty_name_creates_no_session() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let engine = engine_for(FIVE_QUESTIONS, dir.path())?;

    let result = engine.start("", QuestionCount::new(10)?);
    assert!(matches!(result, Err(QuizError::Validation(_))));
    Ok(())
}

#[test]
fn pool_smaller_than_request_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let engine = engine_for(THREE_VALID, dir.path())?;
    assert_eq!(engine.pool().len(), 3);

    let result = engine.start("bob", QuestionCount::new(10)?);
    assert!(matches!(
        result,
        Err(QuizError::InsufficientPool {
            requested: 10,
            available: 3
        })
    ));
    Ok(())
}

#[test]
fn timed_out_session_leaves_history_unchanged() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = engine_for(FIVE_QUESTIONS, dir.path())?;
    let mut history = HistoryStore::open(dir.path().join("score_history.json"))?;

    // One earlier attempt on record.
    let earlier = engine.start("carol", QuestionCount::new(5)?)?;
    if let SessionOutcome::Scored(scored) = engine.submit(earlier) {
        history.append(scored.to_history_record())?;
    }
    let before = history.len();

    let session = engine.start("carol", QuestionCount::new(5)?)?;
    engine.clock_mut().advance(Duration::seconds(301));

    let outcome = engine.submit(session);
    assert!(matches!(outcome, SessionOutcome::TimedOut { limit_secs: 300, .. }));
    if let SessionOutcome::Scored(scored) = outcome {
        history.append(scored.to_history_record())?;
    }

    assert_eq!(history.load()?.len(), before);
    Ok(())
}

#[test]
fn missing_pool_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = QuestionStore::new(dir.path().join("engineering_mcqs.json"));
    assert!(matches!(store.load(), Err(QuizError::Load(_))));
}
