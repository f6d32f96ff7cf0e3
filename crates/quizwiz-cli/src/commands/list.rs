//! The `quizwiz list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizwiz_core::statistics::DashboardSummary;

use super::Context;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, mine: bool) -> Result<()> {
    let ctx = Context::load(global)?;

    let mut quizzes = if mine {
        let caller = ctx.caller()?;
        ctx.quizzes.list_by_author(&caller.id)?
    } else {
        ctx.quizzes.list_all()?
    };
    quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if quizzes.is_empty() {
        println!("No quizzes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Title",
        "Questions",
        "Types",
        "Author",
        "Attempts",
        "Created",
    ]);
    for quiz in &quizzes {
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(quiz.questions.len()),
            Cell::new(quiz.kind_counts()),
            Cell::new(&quiz.created_by_name),
            Cell::new(ctx.results.attempt_count(&quiz.id)?),
            Cell::new(quiz.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }
    println!("{table}");

    if mine {
        let summary = DashboardSummary::compute(&quizzes, &ctx.results)?;
        println!(
            "\n{} quizzes, {} questions, {} attempts",
            summary.quizzes, summary.questions, summary.attempts
        );
    }

    Ok(())
}
