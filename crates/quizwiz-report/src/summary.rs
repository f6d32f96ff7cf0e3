//! Result summaries: score bands, elapsed time, and the plain-text review.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quizwiz_core::grading::{review, QuestionReview};
use quizwiz_core::model::{AttemptResult, Quiz};

/// Coarse rating of a percentage, used for the headline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreBand {
    Perfect,
    Excellent,
    Great,
    Good,
    Fair,
    Passed,
    Failed,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            95.. => Self::Perfect,
            90..=94 => Self::Excellent,
            80..=89 => Self::Great,
            70..=79 => Self::Good,
            60..=69 => Self::Fair,
            50..=59 => Self::Passed,
            _ => Self::Failed,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect score! Outstanding!",
            Self::Excellent => "Excellent work! You nailed it!",
            Self::Great => "Great job! Very impressive!",
            Self::Good => "Good effort! Well done!",
            Self::Fair => "Not bad! Keep practicing!",
            Self::Passed => "You passed! Room for improvement!",
            Self::Failed => "Keep studying! You can do better!",
        }
    }

    /// CSS class used by the HTML review.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Perfect | Self::Excellent | Self::Great => "high",
            Self::Good | Self::Fair => "mid",
            Self::Passed => "low",
            Self::Failed => "fail",
        }
    }
}

/// Format a duration as `"{m}m {s}s"`. Negative durations show as zero.
pub fn format_elapsed(elapsed: chrono::Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Everything the results view shows for one attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultReport {
    pub quiz_id: String,
    pub quiz_title: String,
    pub user_id: String,
    pub user_name: String,
    pub score: u32,
    pub total: u32,
    pub incorrect: u32,
    pub percentage: u32,
    pub band: ScoreBand,
    pub elapsed_seconds: i64,
    pub submitted_at: DateTime<Utc>,
    pub questions: Vec<QuestionReview>,
}

impl ResultReport {
    pub fn new(quiz: &Quiz, result: &AttemptResult) -> Self {
        Self {
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            user_id: result.user_id.clone(),
            user_name: result.user_name.clone(),
            score: result.score,
            total: result.total,
            incorrect: result.incorrect(),
            percentage: result.percentage,
            band: ScoreBand::from_percentage(result.percentage),
            elapsed_seconds: result.elapsed().num_seconds(),
            submitted_at: result.submitted_at,
            questions: review(quiz, &result.answers),
        }
    }

    pub fn elapsed(&self) -> String {
        format_elapsed(chrono::Duration::seconds(self.elapsed_seconds))
    }
}

/// Render the review as plain text for the terminal.
pub fn render_text(report: &ResultReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.quiz_title);
    let _ = writeln!(
        out,
        "{} ({}): {} out of {} correct, {}%",
        report.user_name, report.user_id, report.score, report.total, report.percentage
    );
    let _ = writeln!(out, "{}", report.band.message());
    let _ = writeln!(
        out,
        "Correct: {}  Incorrect: {}  Time: {}",
        report.score,
        report.incorrect,
        report.elapsed()
    );
    let _ = writeln!(out);

    for q in &report.questions {
        let mark = if q.correct { "+" } else { "-" };
        let _ = writeln!(out, "[{mark}] {}. {}", q.number, q.prompt);
        let _ = writeln!(out, "    your answer: {}", q.submitted);
        if !q.correct {
            let _ = writeln!(out, "    correct answer: {}", q.expected);
        }
    }
    out
}

/// Render the report as pretty JSON.
pub fn render_json(report: &ResultReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize result report")
}

/// Write the report as JSON to a file.
pub fn write_json_report(report: &ResultReport, path: &Path) -> Result<()> {
    let json = render_json(report)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
