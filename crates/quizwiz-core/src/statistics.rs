//! Attempt statistics for quizzes and instructor dashboards.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{AttemptResult, Quiz};
use crate::repository::ResultRepository;

/// Percentage at or above which an attempt counts as passed.
pub const DEFAULT_PASS_THRESHOLD: u32 = 50;

/// Aggregate results for one quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub quiz_id: String,
    /// Number of users with a stored result.
    pub attempts: usize,
    /// Mean percentage across attempts, 0.0 with no attempts.
    pub average_percentage: f64,
    pub best_percentage: Option<u32>,
    pub worst_percentage: Option<u32>,
    /// Attempts at or above the pass threshold.
    pub passed: usize,
}

impl QuizStats {
    pub fn from_results(quiz_id: &str, results: &[AttemptResult], pass_threshold: u32) -> Self {
        let relevant: Vec<&AttemptResult> =
            results.iter().filter(|r| r.quiz_id == quiz_id).collect();

        let attempts = relevant.len();
        let average_percentage = if attempts == 0 {
            0.0
        } else {
            relevant.iter().map(|r| r.percentage as f64).sum::<f64>() / attempts as f64
        };

        Self {
            quiz_id: quiz_id.to_string(),
            attempts,
            average_percentage,
            best_percentage: relevant.iter().map(|r| r.percentage).max(),
            worst_percentage: relevant.iter().map(|r| r.percentage).min(),
            passed: relevant
                .iter()
                .filter(|r| r.percentage >= pass_threshold)
                .count(),
        }
    }

    /// Share of attempts that passed, 0.0 with no attempts.
    pub fn pass_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.passed as f64 / self.attempts as f64
        }
    }
}

/// Headline numbers for an instructor's quizzes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub quizzes: usize,
    pub questions: usize,
    pub attempts: usize,
}

impl DashboardSummary {
    pub fn compute(quizzes: &[Quiz], results: &ResultRepository) -> Result<Self, QuizError> {
        let mut attempts = 0;
        for quiz in quizzes {
            attempts += results.attempt_count(&quiz.id)?;
        }
        Ok(Self {
            quizzes: quizzes.len(),
            questions: quizzes.iter().map(|q| q.questions.len()).sum(),
            attempts,
        })
    }
}
