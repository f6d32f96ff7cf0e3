//! The `quizwiz results` command.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use quizwiz_core::repository::result_key;
use quizwiz_report::{
    generate_html, render_json, render_text, write_html_report, write_json_report, ResultReport,
};

use super::Context;
use crate::GlobalArgs;

pub fn execute(
    global: &GlobalArgs,
    id: &str,
    of: Option<String>,
    format: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let ctx = Context::load(global)?;
    let caller = ctx.caller()?;

    let user_id = match of {
        Some(user) if user != caller.id => {
            ctx.instructor("view other users' results")?;
            user
        }
        _ => caller.id,
    };

    let quiz = ctx.require_quiz(id)?;
    let result = ctx
        .results
        .require(&result_key(id, &user_id))
        .with_context(|| format!("{user_id} has not taken quiz {id}"))?;
    let report = ResultReport::new(&quiz, &result);

    match (format, &output) {
        ("text", None) => print!("{}", render_text(&report)),
        ("text", Some(path)) => {
            std::fs::write(path, render_text(&report))
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
        ("json", None) => println!("{}", render_json(&report)?),
        ("json", Some(path)) => write_json_report(&report, path)?,
        ("html", None) => println!("{}", generate_html(&report)),
        ("html", Some(path)) => write_html_report(&report, path)?,
        (other, _) => anyhow::bail!("unknown format: {other} (expected text, json, or html)"),
    }

    if let Some(path) = output {
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}
