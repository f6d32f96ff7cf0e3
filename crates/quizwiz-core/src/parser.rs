//! TOML quiz definition parser.
//!
//! Loads quiz drafts from TOML files and lints them. Drafts are assembled
//! through the authoring operations, so a parsed file obeys the same
//! invariants as a quiz built by hand.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::authoring::{QuestionField, QuizDraft};
use crate::model::QuestionKind;

/// Intermediate TOML structure for quiz definition files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    #[serde(rename = "type", default = "default_kind_str")]
    kind: String,
    #[serde(default)]
    options: Vec<String>,
    /// Accepted text of a short-answer question.
    #[serde(default)]
    answer: Option<String>,
    /// Zero-based index for multiple-choice, boolean (or 0/1) for true-false.
    #[serde(default)]
    correct: Option<toml::Value>,
}

fn default_kind_str() -> String {
    "multiple-choice".to_string()
}

/// Parse a quiz definition file into a draft.
pub fn parse_quiz_definition(path: &Path) -> Result<QuizDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_definition_str(&content, path)
}

/// Parse a TOML string into a draft (useful for testing).
pub fn parse_quiz_definition_str(content: &str, source_path: &Path) -> Result<QuizDraft> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        !parsed.questions.is_empty(),
        "{} defines no questions",
        source_path.display()
    );

    let mut draft = QuizDraft::new();
    draft.set_title(parsed.quiz.title);
    draft.set_description(parsed.quiz.description);

    for (i, q) in parsed.questions.into_iter().enumerate() {
        let number = i + 1;
        let id = if i == 0 {
            draft.questions()[0].id.clone()
        } else {
            draft.add_question()
        };

        let kind: QuestionKind = q
            .kind
            .parse()
            .map_err(|e: String| anyhow::anyhow!("question {number}: {e}"))?;

        let (options, correct) = match kind {
            QuestionKind::MultipleChoice => {
                let correct = q
                    .correct
                    .as_ref()
                    .context(format!("question {number}: multiple-choice needs `correct`"))
                    .and_then(|v| choice_index(v, number))?;
                (q.options, correct)
            }
            QuestionKind::TrueFalse => {
                let correct = q
                    .correct
                    .as_ref()
                    .context(format!("question {number}: true-false needs `correct`"))
                    .and_then(|v| true_false_index(v, number))?;
                (Vec::new(), correct)
            }
            QuestionKind::ShortAnswer => {
                let options = match q.answer {
                    Some(answer) => vec![answer],
                    None => q.options,
                };
                anyhow::ensure!(
                    !options.is_empty(),
                    "question {number}: short-answer needs `answer`"
                );
                (options, 0)
            }
        };

        draft.update_question_field(&id, QuestionField::Kind(kind))?;
        draft.update_question_field(&id, QuestionField::Text(q.text))?;
        draft.update_question_field(&id, QuestionField::Options(options))?;
        draft.update_question_field(&id, QuestionField::CorrectAnswer(correct))?;
    }

    Ok(draft)
}

fn choice_index(value: &toml::Value, number: usize) -> Result<usize> {
    value
        .as_integer()
        .and_then(|i| usize::try_from(i).ok())
        .with_context(|| format!("question {number}: `correct` must be a non-negative integer"))
}

fn true_false_index(value: &toml::Value, number: usize) -> Result<usize> {
    match value {
        toml::Value::Boolean(true) => Ok(0),
        toml::Value::Boolean(false) => Ok(1),
        toml::Value::Integer(i @ (0 | 1)) => Ok(*i as usize),
        _ => anyhow::bail!("question {number}: `correct` must be true or false"),
    }
}

/// Recursively load all `.toml` quiz definitions from a directory.
///
/// Files that fail to parse are skipped with a warning.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<(PathBuf, QuizDraft)>> {
    let mut drafts = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            drafts.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_definition(&path) {
                Ok(draft) => drafts.push((path, draft)),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    drafts.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(drafts)
}

/// A non-blocking problem found in a draft.
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a draft for likely authoring mistakes that do not block publishing.
pub fn lint_draft(draft: &QuizDraft) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if draft.title.trim().is_empty() {
        warnings.push(LintWarning {
            question: None,
            message: "quiz has no title".into(),
        });
    }

    let mut seen_texts = HashSet::new();
    for (i, q) in draft.questions().iter().enumerate() {
        let number = Some(i + 1);
        let text = q.text.trim().to_lowercase();
        if !text.is_empty() && !seen_texts.insert(text) {
            warnings.push(LintWarning {
                question: number,
                message: "same text as an earlier question".into(),
            });
        }

        match q.kind {
            QuestionKind::MultipleChoice => {
                if q.correct_answer >= q.options.len() {
                    warnings.push(LintWarning {
                        question: number,
                        message: format!(
                            "correct answer {} is out of range ({} options); no answer can score",
                            q.correct_answer,
                            q.options.len()
                        ),
                    });
                }
                let mut seen_options = HashSet::new();
                if q
                    .options
                    .iter()
                    .map(|o| o.trim().to_lowercase())
                    .filter(|o| !o.is_empty())
                    .any(|o| !seen_options.insert(o))
                {
                    warnings.push(LintWarning {
                        question: number,
                        message: "options repeat the same text".into(),
                    });
                }
            }
            QuestionKind::TrueFalse => {
                if q.correct_answer > 1 {
                    warnings.push(LintWarning {
                        question: number,
                        message: "true-false correct answer must be 0 (True) or 1 (False)".into(),
                    });
                }
            }
            QuestionKind::ShortAnswer => {
                if q.options.first().is_some_and(|a| a.trim().is_empty()) {
                    warnings.push(LintWarning {
                        question: number,
                        message: "accepted answer is empty; no answer can score".into(),
                    });
                }
                if q.options.len() > 1 {
                    warnings.push(LintWarning {
                        question: number,
                        message: "only the first accepted answer is used".into(),
                    });
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[quiz]
title = "Geography"
description = "Capitals and borders"

[[questions]]
text = "Capital of France?"
type = "short-answer"
answer = "Paris"

[[questions]]
text = "Which is a continent?"
type = "multiple-choice"
options = ["Asia", "Paris", "Nile", "Alps"]
correct = 0

[[questions]]
text = "Berlin is in Germany"
type = "true-false"
correct = true
"#;

    fn parse(content: &str) -> Result<QuizDraft> {
        parse_quiz_definition_str(content, &PathBuf::from("test.toml"))
    }

    #[test]
    fn parse_valid_toml() {
        let draft = parse(VALID_TOML).unwrap();
        assert_eq!(draft.title, "Geography");
        assert_eq!(draft.questions().len(), 3);

        let q = &draft.questions()[0];
        assert_eq!(q.kind, QuestionKind::ShortAnswer);
        assert_eq!(q.canonical_text(), Some("Paris"));

        let q = &draft.questions()[1];
        assert_eq!(q.kind, QuestionKind::MultipleChoice);
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_answer, 0);

        let q = &draft.questions()[2];
        assert_eq!(q.kind, QuestionKind::TrueFalse);
        assert_eq!(q.correct_answer, 0);
        assert!(q.options.is_empty());

        assert!(draft.is_valid());
        assert!(lint_draft(&draft).is_empty());
    }

    #[test]
    fn type_defaults_to_multiple_choice() {
        let draft = parse(
            r#"
[quiz]
title = "Minimal"

[[questions]]
text = "Pick"
options = ["a", "b"]
correct = 1
"#,
        )
        .unwrap();
        assert_eq!(draft.questions()[0].kind, QuestionKind::MultipleChoice);
        assert_eq!(draft.questions()[0].correct_answer, 1);
        assert!(draft.description.is_empty());
    }

    #[test]
    fn true_false_accepts_integer() {
        let draft = parse(
            r#"
[quiz]
title = "TF"

[[questions]]
text = "The earth is flat"
type = "tf"
correct = 1
"#,
        )
        .unwrap();
        assert_eq!(draft.questions()[0].correct_answer, 1);
    }

    #[test]
    fn missing_correct_is_an_error() {
        let err = parse(
            r#"
[quiz]
title = "Bad"

[[questions]]
text = "Pick"
options = ["a", "b"]
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("needs `correct`"));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = parse(
            r#"
[quiz]
title = "Bad"

[[questions]]
text = "Write an essay"
type = "essay"
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("unknown question type"));
    }

    #[test]
    fn no_questions_is_an_error() {
        assert!(parse("[quiz]\ntitle = \"Empty\"\n").is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        assert!(parse("this is not [valid toml }{").is_err());
    }

    #[test]
    fn lint_flags_suspicious_questions() {
        let draft = parse(
            r#"
[quiz]
title = " "

[[questions]]
text = "Pick"
options = ["a", "A", "b"]
correct = 5

[[questions]]
text = "pick"
type = "short-answer"
options = ["one", "two"]
"#,
        )
        .unwrap();
        let warnings = lint_draft(&draft);
        assert!(warnings
            .iter()
            .any(|w| w.question.is_none() && w.message.contains("no title")));
        assert!(warnings.iter().any(|w| w.message.contains("out of range")));
        assert!(warnings.iter().any(|w| w.message.contains("repeat")));
        assert!(warnings
            .iter()
            .any(|w| w.question == Some(2) && w.message.contains("earlier question")));
        assert!(warnings.iter().any(|w| w.message.contains("first accepted")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("geo.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not toml {").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let drafts = load_quiz_directory(dir.path()).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].1.title, "Geography");
    }
}
