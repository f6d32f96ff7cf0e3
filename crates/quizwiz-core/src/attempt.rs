//! A single run through a published quiz.

use chrono::{DateTime, Utc};

use crate::error::QuizError;
use crate::grading::{self, Grade};
use crate::identity::{Identity, IdentityProvider};
use crate::model::{Answer, AnswerSet, AttemptResult, Quiz};

/// An in-progress attempt. Consumed by [`Attempt::submit`], so each attempt
/// produces exactly one result.
#[derive(Debug, Clone)]
pub struct Attempt {
    quiz: Quiz,
    taker: Identity,
    answers: AnswerSet,
    started_at: DateTime<Utc>,
}

impl Attempt {
    /// Start an attempt for the current caller.
    pub fn start(quiz: Quiz, identity: &dyn IdentityProvider) -> Result<Self, QuizError> {
        Self::start_at(quiz, identity, Utc::now())
    }

    pub fn start_at(
        quiz: Quiz,
        identity: &dyn IdentityProvider,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let taker = identity.current().ok_or(QuizError::Unauthenticated)?;
        if quiz.questions.is_empty() {
            return Err(QuizError::invalid("quiz has no questions"));
        }
        tracing::debug!(quiz_id = %quiz.id, user_id = %taker.id, "attempt started");
        Ok(Self {
            quiz,
            taker,
            answers: AnswerSet::new(),
            started_at,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Record (or replace) the answer to a question.
    pub fn answer(&mut self, question_id: &str, answer: Answer) -> Result<(), QuizError> {
        if self.quiz.question(question_id).is_none() {
            return Err(QuizError::UnknownQuestion(question_id.to_string()));
        }
        self.answers.insert(question_id.to_string(), answer);
        Ok(())
    }

    /// Withdraw the answer to a question.
    pub fn clear(&mut self, question_id: &str) -> Option<Answer> {
        self.answers.remove(question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.quiz
            .questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// 1-based numbers of the questions without an answer.
    pub fn unanswered(&self) -> Vec<usize> {
        self.quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| !self.answers.contains_key(&q.id))
            .map(|(i, _)| i + 1)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        grading::is_complete(&self.quiz, &self.answers)
    }

    /// Grade the current answers without submitting.
    pub fn grade(&self) -> Grade {
        grading::grade(&self.quiz, &self.answers)
    }

    /// Submit and grade the attempt.
    pub fn submit(self) -> AttemptResult {
        self.submit_at(Utc::now())
    }

    pub fn submit_at(self, submitted_at: DateTime<Utc>) -> AttemptResult {
        let grade = self.grade();
        tracing::info!(
            quiz_id = %self.quiz.id,
            user_id = %self.taker.id,
            score = grade.score,
            total = grade.total,
            "attempt submitted"
        );
        AttemptResult {
            quiz_id: self.quiz.id,
            user_id: self.taker.id,
            user_name: self.taker.name,
            user_role: self.taker.role,
            answers: self.answers,
            score: grade.score,
            total: grade.total,
            percentage: grade.percentage(),
            started_at: self.started_at,
            submitted_at,
        }
    }
}
