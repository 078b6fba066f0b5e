// User-facing error kinds and input validation

use thiserror::Error;

/// Errors caused by user input.
///
/// These are reported as a single line and never retried. Infrastructure
/// failures (I/O, a corrupt store) travel as `anyhow` errors instead.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("{0}: No such todo")]
    NotFound(usize),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("{0}: invalid date")]
    InvalidDate(String),

    #[error("{0}: Note does not exist")]
    NoSuchNote(usize),

    #[error("{0}")]
    BadArguments(String),

    #[error("{0}: invalid pattern")]
    InvalidPattern(String),
}

/// Validate that a title is not blank
pub fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        Err(TodoError::EmptyTitle)
    } else {
        Ok(())
    }
}

/// Join trailing words into free text, `None` when nothing was given
pub fn join_text(words: &[String]) -> Option<String> {
    let text = words.join(" ");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Join trailing words that a command cannot do without
pub fn require_text(words: &[String], usage: &str) -> Result<String, TodoError> {
    join_text(words).ok_or_else(|| TodoError::BadArguments(format!("usage: todo {}", usage)))
}
