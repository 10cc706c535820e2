//! Question pool loading.
//!
//! The pool file is a JSON array of `{question, options, answer}` objects.
//! Entries that fail validation are dropped, never reported as errors; only
//! an unreadable file or a non-array top level fails the load.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{LoadError, Result};
use crate::model::Question;

/// The validated, immutable set of questions sessions are sampled from.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    questions: Vec<Question>,
    dropped: usize,
}

impl QuestionPool {
    /// Build a pool from already-validated questions.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            dropped: 0,
        }
    }

    /// Parse a pool from JSON text, dropping invalid entries.
    pub fn from_json_str(content: &str, source_path: &Path) -> Result<Self, LoadError> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|source| LoadError::Malformed {
                path: source_path.to_path_buf(),
                source,
            })?;

        let serde_json::Value::Array(entries) = value else {
            return Err(LoadError::NotASequence {
                path: source_path.to_path_buf(),
            });
        };

        let total = entries.len();
        let questions: Vec<Question> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value::<Question>(entry) {
                Ok(q) => Some(q),
                Err(e) => {
                    tracing::debug!("dropping question #{}: {e}", i + 1);
                    None
                }
            })
            .collect();

        let dropped = total - questions.len();
        if dropped > 0 {
            tracing::warn!(
                "{dropped} of {total} questions in {} failed validation and were skipped",
                source_path.display()
            );
        }

        Ok(Self { questions, dropped })
    }

    /// Read and parse a pool file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let pool = Self::from_json_str(&content, path)?;
        tracing::info!(
            "loaded {} questions from {}",
            pool.len(),
            path.display()
        );
        Ok(pool)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of entries in the source file that failed validation.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Loads the pool file once and hands out the cached pool afterwards.
#[derive(Debug)]
pub struct QuestionStore {
    path: PathBuf,
    cache: OnceCell<Arc<QuestionPool>>,
}

impl QuestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: OnceCell::new(),
        }
    }

    /// Load the pool on first call; later calls return the same pool.
    pub fn load(&self) -> Result<Arc<QuestionPool>> {
        if let Some(pool) = self.cache.get() {
            return Ok(Arc::clone(pool));
        }
        let pool = Arc::new(QuestionPool::load(&self.path)?);
        Ok(Arc::clone(self.cache.get_or_init(|| pool)))
    }
}
