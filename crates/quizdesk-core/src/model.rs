//! Core data model types for quizdesk.
//!
//! These are the records shared by the question pool, the session engine,
//! the history store and the CSV exporters.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

/// Format of [`HistoryRecord::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A validated multiple-choice question.
///
/// Holds exactly four distinct options, one of which is the answer. Values
/// that break this cannot be constructed or deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    #[serde(rename = "question")]
    text: String,
    options: [String; OPTION_COUNT],
    answer: String,
}

/// Shape of a question as it appears in the pool file, before validation.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuizError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let options: [String; OPTION_COUNT] = raw.options.try_into().map_err(|v: Vec<String>| {
            QuizError::validation(format!(
                "question must have {OPTION_COUNT} options, found {}",
                v.len()
            ))
        })?;
        Question::new(raw.question, options, raw.answer)
    }
}

impl Question {
    /// Build a question, checking that the options are distinct and contain the answer.
    pub fn new(
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        answer: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let answer = answer.into();
        let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
        if distinct.len() != OPTION_COUNT {
            return Err(QuizError::validation("question options must be distinct"));
        }
        if !options.contains(&answer) {
            return Err(QuizError::validation(format!(
                "answer '{answer}' is not one of the options"
            )));
        }
        Ok(Self {
            text: text.into(),
            options,
            answer,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns true if `option` is one of this question's options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Number of questions in a session, restricted to the offered sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct QuestionCount(u32);

impl QuestionCount {
    /// The session sizes a user may pick from.
    pub const ALLOWED: [u32; 11] = [5, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100];

    pub fn new(count: u32) -> Result<Self, QuizError> {
        if Self::ALLOWED.contains(&count) {
            Ok(Self(count))
        } else {
            Err(QuizError::validation(format!(
                "question count must be one of {:?}, got {count}",
                Self::ALLOWED
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::ALLOWED[0])
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = QuizError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionCount> for u32 {
    fn from(count: QuestionCount) -> Self {
        count.0
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionCount {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| QuizError::validation(format!("not a number: '{s}'")))?;
        Self::new(n)
    }
}

/// Per-question outcome shown after a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Question text.
    pub question: String,
    /// The option the user picked, empty when unanswered.
    pub selected: String,
    /// The correct option.
    pub correct: String,
    /// `selected == correct`.
    pub status: bool,
}

/// One completed, non-timed-out session as stored in the history file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub user: String,
    pub score: u32,
    pub total: u32,
    /// Time taken, in whole seconds.
    #[serde(rename = "time")]
    pub time_secs: u64,
    /// Completion timestamp formatted with [`DATE_FORMAT`]; empty in old records.
    #[serde(default)]
    pub date: String,
}

impl HistoryRecord {
    /// Build a record stamped with `at`, rendered in local time.
    pub fn new(
        user: impl Into<String>,
        score: u32,
        total: u32,
        time_secs: u64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            user: user.into(),
            score,
            total,
            time_secs,
            date: at.with_timezone(&Local).format(DATE_FORMAT).to_string(),
        }
    }
}
