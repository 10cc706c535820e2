//! quizdesk-report — CSV exports for session reviews and score history.

pub mod csv;
