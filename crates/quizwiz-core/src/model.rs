//! Core data model types for quizwiz.
//!
//! These are the fundamental types that the entire quizwiz system uses
//! to represent questions, published quizzes, submitted answers, and graded
//! attempts. Field names serialize in camelCase so stored records keep the
//! `correctAnswer` / `createdBy` / `startedAt` layout.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Role;

/// Number of empty options a fresh multiple-choice question starts with.
pub const DEFAULT_OPTION_COUNT: usize = 4;

/// Generate a fresh opaque identifier for questions and quizzes.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// The kind of a question. Fixed at creation in the UI, but the authoring
/// model allows switching it (see [`crate::authoring::QuestionField::Kind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

impl QuestionKind {
    /// The options a question of this kind starts with.
    pub fn default_options(self) -> Vec<String> {
        match self {
            QuestionKind::MultipleChoice => vec![String::new(); DEFAULT_OPTION_COUNT],
            QuestionKind::TrueFalse => Vec::new(),
            QuestionKind::ShortAnswer => vec![String::new()],
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::MultipleChoice => write!(f, "multiple-choice"),
            QuestionKind::TrueFalse => write!(f, "true-false"),
            QuestionKind::ShortAnswer => write!(f, "short-answer"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multiple-choice" | "mc" | "choice" => Ok(QuestionKind::MultipleChoice),
            "true-false" | "tf" | "bool" => Ok(QuestionKind::TrueFalse),
            "short-answer" | "short" | "text" => Ok(QuestionKind::ShortAnswer),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A single question inside a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Opaque identifier, stable for the lifetime of the quiz.
    pub id: String,
    /// The prompt shown to the quiz taker.
    pub text: String,
    /// Which of the other fields are meaningful.
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Choices for multiple-choice; `options[0]` is the accepted text for
    /// short-answer; unused for true-false.
    #[serde(default)]
    pub options: Vec<String>,
    /// Zero-based index of the right choice. For true-false, 0 is True and
    /// 1 is False. Unused for short-answer.
    #[serde(default)]
    pub correct_answer: usize,
}

impl Question {
    /// A blank multiple-choice question with a freshly generated id.
    pub fn blank() -> Self {
        Self::with_id(generate_id())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            kind: QuestionKind::MultipleChoice,
            options: QuestionKind::MultipleChoice.default_options(),
            correct_answer: 0,
        }
    }

    /// The accepted answer text of a short-answer question.
    pub fn canonical_text(&self) -> Option<&str> {
        match self.kind {
            QuestionKind::ShortAnswer => self.options.first().map(String::as_str),
            _ => None,
        }
    }
}

/// Publication state of a stored quiz. Saving always publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Published,
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizStatus::Published => write!(f, "published"),
        }
    }
}

/// A published quiz as stored in the quiz repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Generated at save time, immutable thereafter.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Insertion order defines question numbering.
    pub questions: Vec<Question>,
    /// Id of the instructor who saved the quiz.
    pub created_by: String,
    /// Display name of the instructor who saved the quiz.
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    pub status: QuizStatus,
}

impl Quiz {
    /// Look up a question by id.
    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// How many questions of each kind the quiz has.
    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for q in &self.questions {
            match q.kind {
                QuestionKind::MultipleChoice => counts.multiple_choice += 1,
                QuestionKind::TrueFalse => counts.true_false += 1,
                QuestionKind::ShortAnswer => counts.short_answer += 1,
            }
        }
        counts
    }
}

/// Question count per kind, shown alongside a quiz in listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCounts {
    pub multiple_choice: usize,
    pub true_false: usize,
    pub short_answer: usize,
}

impl fmt::Display for KindCounts {
    /// `"2 multiple choice, 1 true/false"`; zero true-false and
    /// short-answer counts are left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} multiple choice", self.multiple_choice)?;
        if self.true_false > 0 {
            write!(f, ", {} true/false", self.true_false)?;
        }
        if self.short_answer > 0 {
            write!(f, ", {} short answer", self.short_answer)?;
        }
        Ok(())
    }
}

/// One submitted answer. The variant must match the question kind for the
/// answer to be graded correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Answer {
    MultipleChoice { index: usize },
    TrueFalse { index: usize },
    ShortAnswer { text: String },
}

impl Answer {
    /// True-false answer from a boolean (true → index 0).
    pub fn true_false(value: bool) -> Self {
        Answer::TrueFalse {
            index: if value { 0 } else { 1 },
        }
    }

    pub fn short(text: impl Into<String>) -> Self {
        Answer::ShortAnswer { text: text.into() }
    }
}

/// Submitted answers for one attempt, keyed by question id.
pub type AnswerSet = BTreeMap<String, Answer>;

/// A graded attempt as stored in the result repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub quiz_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: Role,
    /// The full answer set as submitted.
    pub answers: AnswerSet,
    /// Number of questions graded correct.
    pub score: u32,
    /// Question count at grading time.
    pub total: u32,
    /// `round(score / total * 100)`.
    pub percentage: u32,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
}

impl AttemptResult {
    /// Time between start and submission, never negative.
    pub fn elapsed(&self) -> chrono::Duration {
        (self.submitted_at - self.started_at).max(chrono::Duration::zero())
    }

    /// Number of questions graded wrong (or left unanswered).
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.score)
    }
}
