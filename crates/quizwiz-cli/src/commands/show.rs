//! The `quizwiz show` command.

use anyhow::Result;

use quizwiz_core::identity::IdentityProvider;
use quizwiz_core::model::{Question, QuestionKind};

use super::Context;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, id: &str) -> Result<()> {
    let ctx = Context::load(global)?;
    let quiz = ctx.require_quiz(id)?;

    // Answers are only revealed to instructors.
    let reveal = ctx
        .identity
        .current()
        .is_some_and(|caller| caller.is_instructor());

    println!("{}", quiz.title);
    if !quiz.description.is_empty() {
        println!("{}", quiz.description);
    }
    println!(
        "by {} | {} questions | created {}",
        quiz.created_by_name,
        quiz.questions.len(),
        quiz.created_at.format("%Y-%m-%d %H:%M UTC")
    );

    for (i, q) in quiz.questions.iter().enumerate() {
        println!("\n{}. {} ({})", i + 1, q.text, q.kind);
        print_choices(q, reveal);
    }

    Ok(())
}

fn print_choices(question: &Question, reveal: bool) {
    let marker = |index: usize| {
        if reveal && index == question.correct_answer {
            " *"
        } else {
            ""
        }
    };

    match question.kind {
        QuestionKind::MultipleChoice => {
            for (i, option) in question.options.iter().enumerate() {
                println!("   {}) {}{}", i + 1, option, marker(i));
            }
        }
        QuestionKind::TrueFalse => {
            println!("   t) True{}", marker(0));
            println!("   f) False{}", marker(1));
        }
        QuestionKind::ShortAnswer => {
            if reveal {
                println!(
                    "   answer: {}",
                    question.canonical_text().unwrap_or_default()
                );
            }
        }
    }
}
