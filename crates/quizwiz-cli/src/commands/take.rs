//! The `quizwiz take` command.
//!
//! Questions are asked in order and answered one line at a time: a number
//! for multiple-choice, `t`/`f` for true-false, free text for short-answer.
//! An empty line skips the question; end of input skips the rest.

use std::io::BufRead;

use anyhow::Result;

use quizwiz_core::model::{Answer, Question, QuestionKind};
use quizwiz_core::Attempt;
use quizwiz_report::{render_text, ResultReport};

use super::Context;
use crate::GlobalArgs;

pub fn execute(global: &GlobalArgs, id: &str) -> Result<()> {
    let ctx = Context::load(global)?;
    ctx.caller()?;
    let quiz = ctx.require_quiz(id)?;

    let mut attempt = Attempt::start(quiz, &ctx.identity)?;
    let questions = attempt.quiz().questions.clone();
    let total = questions.len();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    'questions: for (i, question) in questions.iter().enumerate() {
        println!("\nQuestion {} of {total}: {}", i + 1, question.text);
        print_prompt(question);

        loop {
            let Some(line) = lines.next().transpose()? else {
                break 'questions;
            };
            match parse_answer(question, &line) {
                Ok(Some(answer)) => {
                    attempt.answer(&question.id, answer)?;
                    break;
                }
                Ok(None) => break,
                Err(e) => eprintln!("{e}, try again"),
            }
        }
    }

    let unanswered = attempt.unanswered();
    if !unanswered.is_empty() {
        let numbers: Vec<String> = unanswered.iter().map(ToString::to_string).collect();
        eprintln!("warning: unanswered questions: {}", numbers.join(", "));
    }

    let quiz = attempt.quiz().clone();
    let result = attempt.submit();
    ctx.results.put(&result)?;

    println!();
    print!("{}", render_text(&ResultReport::new(&quiz, &result)));
    Ok(())
}

fn print_prompt(question: &Question) {
    match question.kind {
        QuestionKind::MultipleChoice => {
            for (i, option) in question.options.iter().enumerate() {
                println!("  {}) {}", i + 1, option);
            }
            println!("Enter 1-{}:", question.options.len());
        }
        QuestionKind::TrueFalse => println!("Enter t or f:"),
        QuestionKind::ShortAnswer => println!("Enter your answer:"),
    }
}

/// Interpret one input line. `Ok(None)` means the question was skipped.
fn parse_answer(question: &Question, line: &str) -> Result<Option<Answer>, String> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let answer = match question.kind {
        QuestionKind::MultipleChoice => {
            let len = question.options.len();
            match input.parse::<usize>() {
                Ok(n) if (1..=len).contains(&n) => Answer::MultipleChoice { index: n - 1 },
                _ => return Err(format!("expected a number from 1 to {len}")),
            }
        }
        QuestionKind::TrueFalse => match input.to_lowercase().as_str() {
            "t" | "true" | "y" | "yes" => Answer::true_false(true),
            "f" | "false" | "n" | "no" => Answer::true_false(false),
            _ => return Err("expected t or f".to_string()),
        },
        QuestionKind::ShortAnswer => Answer::short(line),
    };
    Ok(Some(answer))
}
