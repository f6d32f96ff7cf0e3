//! The `quizwiz delete` command.

use anyhow::Result;

use quizwiz_core::repository::delete_quiz_cascade;
use quizwiz_core::QuizError;

use super::Context;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, id: &str) -> Result<()> {
    let ctx = Context::load(global)?;
    let caller = ctx.instructor("delete quizzes")?;
    let quiz = ctx.require_quiz(id)?;

    if quiz.created_by != caller.id {
        return Err(QuizError::Forbidden(format!(
            "quiz {id} belongs to {}",
            quiz.created_by_name
        ))
        .into());
    }

    let removed = delete_quiz_cascade(&ctx.quizzes, &ctx.results, id)?;
    println!("Deleted \"{}\" and {removed} result(s)", quiz.title);
    Ok(())
}
