//! Attempt grading.
//!
//! Grading is a single pure pass over the quiz's questions. Missing or
//! mismatched answers count as wrong; nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::model::{Answer, AnswerSet, Question, QuestionKind, Quiz};

/// Display text used when a question was left unanswered.
pub const NO_ANSWER: &str = "No answer";

/// Raw outcome of grading one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    /// Questions answered correctly.
    pub score: u32,
    /// Questions in the quiz, answered or not.
    pub total: u32,
}

impl Grade {
    /// `round(score / total * 100)`, or 0 for an empty quiz.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score as f64 / self.total as f64 * 100.0).round() as u32
    }
}

/// Normalize short-answer text for comparison.
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `answer` is the right answer to `question`.
pub fn is_correct(question: &Question, answer: Option<&Answer>) -> bool {
    match (question.kind, answer) {
        (QuestionKind::MultipleChoice, Some(Answer::MultipleChoice { index }))
        | (QuestionKind::TrueFalse, Some(Answer::TrueFalse { index })) => {
            *index == question.correct_answer
        }
        (QuestionKind::ShortAnswer, Some(Answer::ShortAnswer { text })) => question
            .canonical_text()
            .is_some_and(|expected| normalize(text) == normalize(expected)),
        _ => false,
    }
}

/// Grade a set of answers against a quiz.
pub fn grade(quiz: &Quiz, answers: &AnswerSet) -> Grade {
    let score = quiz
        .questions
        .iter()
        .filter(|q| is_correct(q, answers.get(&q.id)))
        .count() as u32;

    Grade {
        score,
        total: quiz.questions.len() as u32,
    }
}

/// Whether every question of the quiz has an entry in the answer set.
pub fn is_complete(quiz: &Quiz, answers: &AnswerSet) -> bool {
    quiz.questions.iter().all(|q| answers.contains_key(&q.id))
}

/// Per-question breakdown shown on the results view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionReview {
    /// 1-based question number.
    pub number: usize,
    pub question_id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    pub correct: bool,
    /// What the taker submitted, as display text.
    pub submitted: String,
    /// The canonical answer, as display text.
    pub expected: String,
}

fn true_false_label(index: usize) -> Option<&'static str> {
    match index {
        0 => Some("True"),
        1 => Some("False"),
        _ => None,
    }
}

fn submitted_text(question: &Question, answer: Option<&Answer>) -> String {
    match answer {
        None => NO_ANSWER.to_string(),
        Some(Answer::MultipleChoice { index }) => question
            .options
            .get(*index)
            .cloned()
            .unwrap_or_else(|| format!("option {}", index + 1)),
        Some(Answer::TrueFalse { index }) => true_false_label(*index)
            .map(str::to_string)
            .unwrap_or_else(|| NO_ANSWER.to_string()),
        Some(Answer::ShortAnswer { text }) if text.trim().is_empty() => NO_ANSWER.to_string(),
        Some(Answer::ShortAnswer { text }) => text.clone(),
    }
}

fn expected_text(question: &Question) -> String {
    match question.kind {
        QuestionKind::MultipleChoice => question
            .options
            .get(question.correct_answer)
            .cloned()
            .unwrap_or_default(),
        QuestionKind::TrueFalse => true_false_label(question.correct_answer)
            .unwrap_or("False")
            .to_string(),
        QuestionKind::ShortAnswer => question.canonical_text().unwrap_or_default().to_string(),
    }
}

/// Build the per-question review of an attempt, in question order.
pub fn review(quiz: &Quiz, answers: &AnswerSet) -> Vec<QuestionReview> {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = answers.get(&q.id);
            QuestionReview {
                number: i + 1,
                question_id: q.id.clone(),
                prompt: q.text.clone(),
                kind: q.kind,
                correct: is_correct(q, answer),
                submitted: submitted_text(q, answer),
                expected: expected_text(q),
            }
        })
        .collect()
}
