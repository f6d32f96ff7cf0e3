//! HTML report generator.
//!
//! Produces a self-contained HTML review page with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use crate::summary::ResultReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML review page for one attempt.
pub fn generate_html(report: &ResultReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizwiz results: {}</title>\n",
        html_escape(&report.quiz_title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.quiz_title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} | submitted {}</p>\n",
        html_escape(&report.user_name),
        report.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score card
    html.push_str("<section class=\"score\">\n");
    html.push_str(&format!(
        "<div class=\"badge {}\">{}%</div>\n",
        report.band.css_class(),
        report.percentage
    ));
    html.push_str(&format!(
        "<h2>{} out of {} correct</h2>\n<p>{}</p>\n",
        report.score,
        report.total,
        html_escape(report.band.message())
    ));
    html.push_str("<table class=\"summary\">\n<tbody>\n");
    html.push_str(&format!(
        "<tr><th>Correct</th><td>{}</td></tr>\n<tr><th>Incorrect</th><td>{}</td></tr>\n<tr><th>Time</th><td>{}</td></tr>\n",
        report.score,
        report.incorrect,
        report.elapsed()
    ));
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-question review
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Review</h2>\n");
    html.push_str("<table class=\"review-table\">\n");
    html.push_str(
        "<thead><tr><th>#</th><th>Question</th><th>Your answer</th><th>Correct answer</th></tr></thead>\n",
    );
    html.push_str("<tbody>\n");
    for q in &report.questions {
        let class = if q.correct { "pass" } else { "fail" };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            q.number,
            html_escape(&q.prompt),
            html_escape(&q.submitted),
            html_escape(&q.expected),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML review page to a file.
pub fn write_html_report(report: &ResultReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.badge { display: inline-block; font-size: 2.5rem; font-weight: bold; padding: 1.5rem; border-radius: 50%; border: 4px solid; }
.badge.high { color: #16a34a; }
.badge.mid { color: #ca8a04; }
.badge.low { color: #ea580c; }
.badge.fail { color: #dc2626; background: none; }
"#;
