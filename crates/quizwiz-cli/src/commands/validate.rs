//! The `quizwiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizwiz_core::parser::{lint_draft, load_quiz_directory, parse_quiz_definition};

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let drafts = if quiz_path.is_dir() {
        load_quiz_directory(&quiz_path)?
    } else {
        vec![(quiz_path.clone(), parse_quiz_definition(&quiz_path)?)]
    };

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for (path, draft) in &drafts {
        println!(
            "Quiz: {} ({} questions) [{}]",
            draft.title,
            draft.questions().len(),
            path.display()
        );

        let issues = draft.validate();
        for issue in &issues {
            println!("  ERROR: {issue}");
        }
        total_errors += issues.len();

        let warnings = lint_draft(draft);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [question {n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} error(s) found; quizzes cannot be published");
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
