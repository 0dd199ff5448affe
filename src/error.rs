//! Error types
//!
//! `QuizError` covers everything a submission can be rejected for. The
//! recoverable variants carry user-facing messages so the presentation layer
//! can show them as a transient advisory.

use thiserror::Error;

use crate::sim::QuestionKind;

/// Errors returned by the game state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// Numeric input was empty or not a whole number. Nothing changes; retry.
    #[error("{}", invalid_format_message(.input))]
    InvalidFormat { input: String },
    /// No question is awaiting an answer (game over, or a stale submission).
    #[error("no question is waiting for an answer")]
    NotAwaitingAnswer,
    /// The submission used the wrong input mode for the live question.
    #[error("this question expects a {expected} answer")]
    InputModeMismatch { expected: QuestionKind },
    /// The state machine reached a state it should never be in.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(&'static str),
}

fn invalid_format_message(input: &str) -> &'static str {
    if input.is_empty() {
        "Enter an answer"
    } else {
        "Answer must be a whole number"
    }
}

impl QuizError {
    /// Whether the caller may simply show the message and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, QuizError::InternalInvariantViolation(_))
    }
}

/// Errors raised while loading `Settings`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_messages() {
        let empty = QuizError::InvalidFormat {
            input: String::new(),
        };
        assert_eq!(empty.to_string(), "Enter an answer");

        let garbage = QuizError::InvalidFormat {
            input: "twelve".into(),
        };
        assert_eq!(garbage.to_string(), "Answer must be a whole number");
    }

    #[test]
    fn test_recoverable() {
        assert!(QuizError::NotAwaitingAnswer.is_recoverable());
        assert!(
            QuizError::InputModeMismatch {
                expected: QuestionKind::Numeric
            }
            .is_recoverable()
        );
        assert!(!QuizError::InternalInvariantViolation("no round").is_recoverable());
    }
}
