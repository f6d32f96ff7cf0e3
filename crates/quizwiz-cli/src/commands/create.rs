//! The `quizwiz create` command.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use quizwiz_core::parser::{lint_draft, parse_quiz_definition};

use super::Context;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, quiz_path: PathBuf) -> Result<()> {
    let ctx = Context::load(global)?;
    let draft = parse_quiz_definition(&quiz_path)?;

    for w in lint_draft(&draft) {
        match w.question {
            Some(n) => eprintln!("warning: question {n}: {}", w.message),
            None => eprintln!("warning: {}", w.message),
        }
    }

    let quiz = draft
        .save(&ctx.quizzes, &ctx.identity)
        .with_context(|| format!("cannot publish {}", quiz_path.display()))?;

    println!(
        "Published \"{}\" ({} questions)",
        quiz.title,
        quiz.questions.len()
    );
    println!("id: {}", quiz.id);
    Ok(())
}
