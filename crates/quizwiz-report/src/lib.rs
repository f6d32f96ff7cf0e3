//! quizwiz-report: rendering of graded attempts.
//!
//! Turns a stored result and its quiz into a [`ResultReport`] and renders
//! it as terminal text, JSON, or a self-contained HTML page.

pub mod html;
pub mod summary;

pub use html::{generate_html, write_html_report};
pub use summary::{
    format_elapsed, render_json, render_text, write_json_report, ResultReport, ScoreBand,
};
