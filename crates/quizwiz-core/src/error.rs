//! Error types for the quiz lifecycle.
//!
//! Ordinary absence (a missing answer, a missing record) is modelled as data
//! and never shows up here. These variants cover structural violations:
//! invalid drafts, bad caller input, and storage failures.

use thiserror::Error;

/// A single reason a draft cannot be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// 1-based question number, or `None` for quiz-level issues.
    pub question: Option<usize>,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.question {
            Some(n) => write!(f, "question {n}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has no room left for the write.
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// The backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store's own container could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Errors that can occur while authoring, taking, or storing quizzes.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A draft failed the publishable invariant.
    #[error("quiz is not valid: {}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// A lookup found no record.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// The underlying store rejected a read or write.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// A stored value could not be decoded into the expected shape.
    #[error("corrupt record at {key}: {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// No question with this id exists in the draft or quiz.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// An option index outside the question's current options.
    #[error("option {index} out of range for question {question_id} ({len} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        len: usize,
    },

    /// The operation needs a signed-in caller.
    #[error("no current identity")]
    Unauthenticated,

    /// The caller's role does not permit the operation.
    #[error("{0}")]
    Forbidden(String),
}

impl QuizError {
    /// A single quiz-level validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        QuizError::Validation(vec![ValidationIssue {
            question: None,
            message: message.into(),
        }])
    }
}
