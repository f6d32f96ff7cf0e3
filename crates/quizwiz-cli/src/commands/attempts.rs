//! The `quizwiz attempts` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizwiz_core::statistics::QuizStats;
use quizwiz_report::format_elapsed;

use super::Context;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, id: &str) -> Result<()> {
    let ctx = Context::load(global)?;
    ctx.instructor("view attempts")?;
    let quiz = ctx.require_quiz(id)?;

    let mut results = ctx.results.list_for_quiz(id)?;
    results.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

    println!("{}", quiz.title);
    if results.is_empty() {
        println!("No attempts yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["User", "Name", "Score", "Percent", "Time", "Submitted"]);
    for r in &results {
        table.add_row(vec![
            Cell::new(&r.user_id),
            Cell::new(&r.user_name),
            Cell::new(format!("{}/{}", r.score, r.total)),
            Cell::new(format!("{}%", r.percentage)),
            Cell::new(format_elapsed(r.elapsed())),
            Cell::new(r.submitted_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");

    let stats = QuizStats::from_results(id, &results, ctx.config.pass_threshold);
    println!(
        "\n{} attempts | average {:.1}% | best {}% | worst {}% | passed {:.0}%",
        stats.attempts,
        stats.average_percentage,
        stats.best_percentage.unwrap_or(0),
        stats.worst_percentage.unwrap_or(0),
        stats.pass_rate() * 100.0
    );
    Ok(())
}
