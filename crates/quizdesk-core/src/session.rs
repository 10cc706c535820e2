//! Timed quiz sessions.
//!
//! The engine has no mutable session state of its own. `start` hands out an
//! owned [`Session`] (in progress) and `submit` consumes it, returning a
//! [`SessionOutcome`]. Dropping a `Session` abandons the attempt.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{QuizError, Result};
use crate::model::{HistoryRecord, Question, QuestionCount, ReviewEntry};
use crate::pool::QuestionPool;

/// Default time allowance per question, in seconds.
pub const DEFAULT_SECONDS_PER_QUESTION: u64 = 60;

/// Configuration for the session engine.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Seconds allowed per question; the session limit is `count * seconds_per_question`.
    pub seconds_per_question: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
        }
    }
}

/// Starts and scores quiz attempts against a shared question pool.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    pool: Arc<QuestionPool>,
    clock: Clock,
    config: SessionConfig,
}

impl SessionEngine {
    pub fn new(pool: Arc<QuestionPool>, clock: Clock, config: SessionConfig) -> Self {
        Self {
            pool,
            clock,
            config,
        }
    }

    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Start a session using the thread-local RNG.
    pub fn start(&self, username: &str, count: QuestionCount) -> Result<Session> {
        self.start_with_rng(username, count, &mut rand::rng())
    }

    /// Start a session, sampling questions with `rng`.
    ///
    /// # Errors
    ///
    /// `QuizError::Validation` if `username` is blank.
    /// `QuizError::InsufficientPool` if the pool holds fewer than `count` questions.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &self,
        username: &str,
        count: QuestionCount,
        rng: &mut R,
    ) -> Result<Session> {
        if username.trim().is_empty() {
            return Err(QuizError::validation("please enter your name"));
        }

        let requested = count.as_usize();
        let available = self.pool.len();
        if available < requested {
            return Err(QuizError::InsufficientPool {
                requested,
                available,
            });
        }

        let questions: Vec<Question> = rand::seq::index::sample(rng, available, requested)
            .into_iter()
            .map(|i| self.pool.questions()[i].clone())
            .collect();

        let time_limit_secs =
            u64::from(count.get()).saturating_mul(self.config.seconds_per_question);
        let session = Session {
            id: Uuid::new_v4(),
            username: username.to_string(),
            count,
            started_at: self.clock.now(),
            time_limit_secs,
            questions,
            responses: BTreeMap::new(),
        };

        tracing::info!(
            session = %session.id,
            user = %session.username,
            "started session with {} questions, limit {}s",
            requested,
            session.time_limit_secs
        );

        Ok(session)
    }

    /// Finish a session and score it, unless the time limit was exceeded.
    pub fn submit(&self, session: Session) -> SessionOutcome {
        let completed_at = self.clock.now();
        let elapsed_secs = u64::try_from((completed_at - session.started_at).num_seconds())
            .unwrap_or(0);
        let limit_secs = session.time_limit_secs;

        if elapsed_secs > limit_secs {
            tracing::warn!(
                session = %session.id,
                user = %session.username,
                "time limit exceeded: took {elapsed_secs}s, limit {limit_secs}s"
            );
            return SessionOutcome::TimedOut {
                username: session.username,
                elapsed_secs,
                limit_secs,
            };
        }

        let review: Vec<ReviewEntry> = session
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let selected = session.responses.get(&i).cloned().unwrap_or_default();
                let status = selected == q.answer();
                ReviewEntry {
                    question: q.text().to_string(),
                    selected,
                    correct: q.answer().to_string(),
                    status,
                }
            })
            .collect();
        let score = review.iter().filter(|r| r.status).count() as u32;

        tracing::info!(
            session = %session.id,
            user = %session.username,
            "scored {score}/{} in {elapsed_secs}s",
            session.count
        );

        SessionOutcome::Scored(ScoredSession {
            username: session.username,
            score,
            total: session.count.get(),
            elapsed_secs,
            completed_at,
            review,
        })
    }
}

/// An in-progress quiz attempt.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    username: String,
    count: QuestionCount,
    started_at: DateTime<Utc>,
    time_limit_secs: u64,
    questions: Vec<Question>,
    responses: BTreeMap<usize, String>,
}

impl Session {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn count(&self) -> QuestionCount {
        self.count
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_secs
    }

    /// The sampled questions, in presentation order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The option chosen for question `index`, if any.
    pub fn response(&self, index: usize) -> Option<&str> {
        self.responses.get(&index).map(String::as_str)
    }

    pub fn answered(&self) -> usize {
        self.responses.len()
    }

    /// Record (or replace) the option chosen for question `index`.
    ///
    /// # Errors
    ///
    /// `QuizError::Validation` if `index` is out of range or `option` is not
    /// one of that question's options; the session is left unchanged.
    pub fn record_response(&mut self, index: usize, option: impl Into<String>) -> Result<()> {
        let option = option.into();
        let question = self.questions.get(index).ok_or_else(|| {
            QuizError::validation(format!(
                "question index {index} out of range (session has {})",
                self.questions.len()
            ))
        })?;
        if !question.has_option(&option) {
            return Err(QuizError::validation(format!(
                "'{option}' is not an option for question {}",
                index + 1
            )));
        }
        tracing::debug!(session = %self.id, "question {} answered", index + 1);
        self.responses.insert(index, option);
        Ok(())
    }

    /// Forget the answer to question `index`. Returns the previous answer.
    pub fn clear_response(&mut self, index: usize) -> Option<String> {
        self.responses.remove(&index)
    }
}

/// Terminal state of a submitted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Scored(ScoredSession),
    /// Submitted after the limit; nothing is scored or recorded.
    TimedOut {
        username: String,
        elapsed_secs: u64,
        limit_secs: u64,
    },
}

/// Result of a session submitted within its time limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSession {
    pub username: String,
    pub score: u32,
    pub total: u32,
    pub elapsed_secs: u64,
    pub completed_at: DateTime<Utc>,
    /// One entry per question, in presentation order.
    pub review: Vec<ReviewEntry>,
}

impl ScoredSession {
    /// The record to hand to the history store.
    pub fn to_history_record(&self) -> HistoryRecord {
        HistoryRecord::new(
            self.username.clone(),
            self.score,
            self.total,
            self.elapsed_secs,
            self.completed_at,
        )
    }
}
