//! Quiz authoring model.
//!
//! A [`QuizDraft`] is the editable, not-yet-persisted form of a quiz. It
//! always holds at least one question and only becomes a [`Quiz`] through
//! [`QuizDraft::save`], which stamps ownership and hands the record to the
//! quiz repository.

use chrono::{DateTime, Utc};

use crate::error::{QuizError, ValidationIssue};
use crate::identity::IdentityProvider;
use crate::model::{generate_id, Question, QuestionKind, Quiz, QuizStatus};
use crate::repository::QuizRepository;

/// A replacement value for one field of a draft question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionField {
    Text(String),
    /// Switching kind resets options and the correct answer to the new
    /// kind's defaults. Setting the current kind again changes nothing.
    Kind(QuestionKind),
    CorrectAnswer(usize),
    /// Replaces the whole option list.
    Options(Vec<String>),
}

/// An in-memory quiz under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    questions: Vec<Question>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            questions: vec![Question::blank()],
        }
    }
}

impl QuizDraft {
    /// An empty draft with one blank question.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Questions in display order. Never empty.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    fn question_mut(&mut self, question_id: &str) -> Result<&mut Question, QuizError> {
        self.questions
            .iter_mut()
            .find(|q| q.id == question_id)
            .ok_or_else(|| QuizError::UnknownQuestion(question_id.to_string()))
    }

    /// Append a blank multiple-choice question and return its id.
    pub fn add_question(&mut self) -> String {
        let question = Question::blank();
        let id = question.id.clone();
        self.questions.push(question);
        id
    }

    /// Replace one field of a question.
    pub fn update_question_field(
        &mut self,
        question_id: &str,
        field: QuestionField,
    ) -> Result<(), QuizError> {
        let question = self.question_mut(question_id)?;
        match field {
            QuestionField::Text(text) => question.text = text,
            QuestionField::Kind(kind) => {
                if question.kind != kind {
                    question.kind = kind;
                    question.options = kind.default_options();
                    question.correct_answer = 0;
                }
            }
            QuestionField::CorrectAnswer(index) => question.correct_answer = index,
            QuestionField::Options(options) => question.options = options,
        }
        Ok(())
    }

    /// Replace a single option of a question.
    pub fn update_option(
        &mut self,
        question_id: &str,
        option_index: usize,
        value: impl Into<String>,
    ) -> Result<(), QuizError> {
        let question = self.question_mut(question_id)?;
        let len = question.options.len();
        let slot = question
            .options
            .get_mut(option_index)
            .ok_or_else(|| QuizError::OptionOutOfRange {
                question_id: question_id.to_string(),
                index: option_index,
                len,
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Append an empty choice to a multiple-choice question. Returns the new
    /// option's index.
    pub fn add_option(&mut self, question_id: &str) -> Result<usize, QuizError> {
        let question = self.question_mut(question_id)?;
        if question.kind != QuestionKind::MultipleChoice {
            return Err(QuizError::invalid(format!(
                "{} questions have a fixed option list",
                question.kind
            )));
        }
        question.options.push(String::new());
        Ok(question.options.len() - 1)
    }

    /// Remove a question. Removing the last one leaves a single fresh blank
    /// question instead. Returns `false` if no question had this id.
    pub fn remove_question(&mut self, question_id: &str) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != question_id);
        let removed = self.questions.len() != before;
        if self.questions.is_empty() {
            self.questions.push(Question::blank());
        }
        removed
    }

    /// Everything that keeps this draft from being published.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.title.trim().is_empty() {
            issues.push(ValidationIssue {
                question: None,
                message: "title is empty".into(),
            });
        }

        for (i, q) in self.questions.iter().enumerate() {
            let number = Some(i + 1);
            if q.text.trim().is_empty() {
                issues.push(ValidationIssue {
                    question: number,
                    message: "question text is empty".into(),
                });
            }
            match q.kind {
                QuestionKind::MultipleChoice => {
                    if q.options.iter().any(|opt| opt.trim().is_empty()) {
                        issues.push(ValidationIssue {
                            question: number,
                            message: "every option needs text".into(),
                        });
                    }
                }
                QuestionKind::ShortAnswer => {
                    if q.options.is_empty() {
                        issues.push(ValidationIssue {
                            question: number,
                            message: "short answer has no accepted answer".into(),
                        });
                    }
                }
                QuestionKind::TrueFalse => {}
            }
        }

        issues
    }

    /// Whether the draft can be published.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Publish the draft through the quiz repository.
    ///
    /// The draft itself is left untouched, so a failed save loses nothing.
    pub fn save(
        &self,
        quizzes: &QuizRepository,
        identity: &dyn IdentityProvider,
    ) -> Result<Quiz, QuizError> {
        self.save_at(quizzes, identity, Utc::now())
    }

    /// [`save`](Self::save) with an explicit creation time.
    pub fn save_at(
        &self,
        quizzes: &QuizRepository,
        identity: &dyn IdentityProvider,
        created_at: DateTime<Utc>,
    ) -> Result<Quiz, QuizError> {
        let author = identity.current().ok_or(QuizError::Unauthenticated)?;
        if !author.is_instructor() {
            return Err(QuizError::Forbidden(format!(
                "only instructors can publish quizzes ({} is a {})",
                author.name, author.role
            )));
        }

        let issues = self.validate();
        if !issues.is_empty() {
            return Err(QuizError::Validation(issues));
        }

        let quiz = Quiz {
            id: generate_id(),
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self.questions.clone(),
            created_by: author.id,
            created_by_name: author.name,
            created_at,
            status: QuizStatus::Published,
        };
        quizzes.put(&quiz)?;

        tracing::info!(
            quiz_id = %quiz.id,
            questions = quiz.questions.len(),
            author = %quiz.created_by,
            "published quiz"
        );
        Ok(quiz)
    }
}
