//! quizwiz-core: quiz data model, authoring, grading, and repositories.
//!
//! This crate defines the quiz lifecycle that the rest of quizwiz builds on:
//! a draft is authored, published into a key-value store, attempted, graded,
//! and the graded result stored back.

pub mod attempt;
pub mod authoring;
pub mod error;
pub mod grading;
pub mod identity;
pub mod model;
pub mod parser;
pub mod repository;
pub mod statistics;
pub mod store;

pub use attempt::Attempt;
pub use authoring::{QuestionField, QuizDraft};
pub use error::{QuizError, StoreError, ValidationIssue};
pub use grading::{grade, review, Grade, QuestionReview};
pub use identity::{Identity, IdentityProvider, Role, StaticIdentity};
pub use model::{
    Answer, AnswerSet, AttemptResult, KindCounts, Question, QuestionKind, Quiz, QuizStatus,
};
pub use repository::{QuizRepository, ResultRepository};
pub use store::{KeyValueStore, MemoryStore};
