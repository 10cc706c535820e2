//! quizdesk-core — Question pool, score history, and the timed session engine.
//!
//! This crate defines the data model and the quiz lifecycle that the
//! quizdesk CLI and report exporters build on.

pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod pool;
pub mod session;

pub use error::{LoadError, QuizError};
