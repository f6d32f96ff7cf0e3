//! The `quizwiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizwiz.toml
    if std::path::Path::new("quizwiz.toml").exists() {
        println!("quizwiz.toml already exists, skipping.");
    } else {
        std::fs::write("quizwiz.toml", SAMPLE_CONFIG)?;
        println!("Created quizwiz.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizwiz.toml with your identity");
    println!("  2. Run: quizwiz validate --quiz quizzes/example.toml");
    println!("  3. Run: quizwiz create --quiz quizzes/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizwiz configuration

store_path = "./quizwiz-data/store.json"
pass_threshold = 50

[identity]
id = "${USER}"
role = "instructor"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "Example Quiz"
description = "A short quiz to get started"

[[questions]]
text = "What is the capital of France?"
type = "short-answer"
answer = "Paris"

[[questions]]
text = "Which planet is closest to the sun?"
type = "multiple-choice"
options = ["Venus", "Mercury", "Mars", "Earth"]
correct = 1

[[questions]]
text = "Water boils at 100 degrees Celsius at sea level."
type = "true-false"
correct = true
"#;
