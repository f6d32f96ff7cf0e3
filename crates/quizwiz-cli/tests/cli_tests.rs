//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizwiz() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizwiz").unwrap()
}

fn repo_quizzes() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../quizzes")
}

const QUIZ: &str = r#"
[quiz]
title = "Capitals"

[[questions]]
text = "Capital of France?"
type = "short-answer"
answer = "Paris"

[[questions]]
text = "Closest planet to the sun?"
type = "multiple-choice"
options = ["Venus", "Mercury", "Mars", "Earth"]
correct = 1

[[questions]]
text = "Berlin is in Germany"
type = "true-false"
correct = true
"#;

/// An isolated working directory with its own store and no ambient config.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = quizwiz();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("QUIZWIZ_STORE")
            .env_remove("QUIZWIZ_USER_ID")
            .env_remove("QUIZWIZ_USER_NAME")
            .env_remove("QUIZWIZ_USER_ROLE")
            .arg("--store")
            .arg(self.dir.path().join("store.json"));
        cmd
    }

    fn instructor(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--user", "i1", "--name", "Ida", "--role", "instructor"]);
        cmd
    }

    fn student(&self, id: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--user", id, "--role", "student"]);
        cmd
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Publish [`QUIZ`] as the instructor and return its id.
    fn publish(&self) -> String {
        let path = self.write("capitals.toml", QUIZ);
        let output = self
            .instructor()
            .arg("create")
            .arg("--quiz")
            .arg(&path)
            .output()
            .unwrap();
        assert!(output.status.success());

        String::from_utf8(output.stdout)
            .unwrap()
            .lines()
            .find_map(|l| l.strip_prefix("id: "))
            .map(str::to_string)
            .expect("create prints the quiz id")
    }
}

#[test]
fn validate_repo_quizzes() {
    quizwiz()
        .arg("validate")
        .arg("--quiz")
        .arg(repo_quizzes())
        .assert()
        .success()
        .stdout(predicate::str::contains("World Geography (4 questions)"))
        .stdout(predicate::str::contains("Rust Basics (3 questions)"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_reports_errors() {
    let sandbox = Sandbox::new();
    let path = sandbox.write(
        "bad.toml",
        r#"
[quiz]
title = "Bad"

[[questions]]
text = "Pick"
options = ["a", ""]
correct = 0
"#,
    );

    sandbox
        .cmd()
        .arg("validate")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("ERROR: question 1: every option needs text"))
        .stderr(predicate::str::contains("cannot be published"));
}

#[test]
fn validate_nonexistent_file() {
    quizwiz()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizwiz.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(sandbox.dir.path().join("quizwiz.toml").exists());
    assert!(sandbox.dir.path().join("quizzes/example.toml").exists());

    sandbox
        .cmd()
        .arg("validate")
        .arg("--quiz")
        .arg("quizzes/example.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn init_skips_existing() {
    let sandbox = Sandbox::new();

    // First init
    sandbox.cmd().arg("init").assert().success();

    // Second init should skip
    sandbox
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn create_requires_identity() {
    let sandbox = Sandbox::new();
    let path = sandbox.write("capitals.toml", QUIZ);

    sandbox
        .cmd()
        .arg("create")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no current identity"));
}

#[test]
fn students_cannot_publish() {
    let sandbox = Sandbox::new();
    let path = sandbox.write("capitals.toml", QUIZ);

    sandbox
        .student("s1")
        .arg("create")
        .arg("--quiz")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("only instructors can publish"));
}

#[test]
fn create_list_and_show() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(&id))
        .stdout(predicate::str::contains("Capitals"))
        .stdout(predicate::str::contains(
            "1 multiple choice, 1 true/false, 1 short answer",
        ));

    sandbox
        .instructor()
        .arg("list")
        .arg("--mine")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 quizzes, 3 questions, 0 attempts"));

    // Students see the choices but not the key.
    sandbox
        .student("s1")
        .arg("show")
        .arg("--id")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("2) Mercury"))
        .stdout(predicate::str::contains("Mercury *").not())
        .stdout(predicate::str::contains("answer: Paris").not());

    sandbox
        .instructor()
        .arg("show")
        .arg("--id")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("2) Mercury *"))
        .stdout(predicate::str::contains("answer: Paris"));
}

#[test]
fn list_empty_store() {
    Sandbox::new()
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No quizzes found"));
}

#[test]
fn show_unknown_quiz() {
    Sandbox::new()
        .cmd()
        .arg("show")
        .arg("--id")
        .arg("missing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiz not found: quiz:missing"));
}

#[test]
fn take_perfect_score() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("take")
        .arg("--id")
        .arg(&id)
        .write_stdin("  paris \n2\nt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 out of 3 correct, 100%"))
        .stdout(predicate::str::contains("Perfect score!"));
}

#[test]
fn take_reprompts_invalid_input_and_skips_blank_lines() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("take")
        .arg("--id")
        .arg(&id)
        .write_stdin("\n9\n2\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("expected a number from 1 to 4"))
        .stderr(predicate::str::contains("unanswered questions: 1, 3"))
        .stdout(predicate::str::contains("1 out of 3 correct, 33%"))
        .stdout(predicate::str::contains("your answer: No answer"));
}

#[test]
fn retake_keeps_latest_result() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("take")
        .arg("--id")
        .arg(&id)
        .write_stdin("Lyon\n1\nf\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 out of 3 correct, 0%"));

    sandbox
        .student("s1")
        .arg("take")
        .arg("--id")
        .arg(&id)
        .write_stdin("Paris\n2\nf\n")
        .assert()
        .success();

    let output = sandbox
        .student("s1")
        .arg("results")
        .arg("--id")
        .arg(&id)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["score"], 2);
    assert_eq!(report["percentage"], 67);
    assert_eq!(report["band"], "fair");

    sandbox
        .instructor()
        .arg("attempts")
        .arg("--id")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("2/3"))
        .stdout(predicate::str::contains("1 attempts"));
}

#[test]
fn results_access_rules() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("take")
        .arg("--id")
        .arg(&id)
        .write_stdin("Paris\n2\nt\n")
        .assert()
        .success();

    // Another student cannot read s1's result.
    sandbox
        .student("s2")
        .arg("results")
        .arg("--id")
        .arg(&id)
        .arg("--of")
        .arg("s1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("only instructors"));

    // s2 has no result of their own.
    sandbox
        .student("s2")
        .arg("results")
        .arg("--id")
        .arg(&id)
        .assert()
        .failure()
        .stderr(predicate::str::contains("s2 has not taken quiz"));

    // The instructor can, and can export it as HTML.
    let html = sandbox.dir.path().join("reports").join("s1.html");
    sandbox
        .instructor()
        .arg("results")
        .arg("--id")
        .arg(&id)
        .arg("--of")
        .arg("s1")
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg(&html)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report written to"));
    let content = std::fs::read_to_string(&html).unwrap();
    assert!(content.contains("3 out of 3 correct"));

    sandbox
        .student("s1")
        .arg("results")
        .arg("--id")
        .arg(&id)
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn attempts_requires_instructor() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("attempts")
        .arg("--id")
        .arg(&id)
        .assert()
        .failure()
        .stderr(predicate::str::contains("only instructors can view attempts"));

    sandbox
        .instructor()
        .arg("attempts")
        .arg("--id")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("No attempts yet"));
}

#[test]
fn delete_removes_quiz_and_results() {
    let sandbox = Sandbox::new();
    let id = sandbox.publish();

    sandbox
        .student("s1")
        .arg("take")
        .arg("--id")
        .arg(&id)
        .write_stdin("Paris\n2\nt\n")
        .assert()
        .success();

    // Only the author may delete.
    sandbox
        .cmd()
        .args(["--user", "i2", "--role", "instructor"])
        .arg("delete")
        .arg("--id")
        .arg(&id)
        .assert()
        .failure()
        .stderr(predicate::str::contains("belongs to Ida"));

    sandbox
        .instructor()
        .arg("delete")
        .arg("--id")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("and 1 result(s)"));

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No quizzes found"));
}

#[test]
fn identity_from_config_file() {
    let sandbox = Sandbox::new();
    let config = sandbox.write(
        "custom.toml",
        "[identity]\nid = \"i1\"\nname = \"Ida\"\nrole = \"instructor\"\n",
    );
    let quiz = sandbox.write("capitals.toml", QUIZ);

    sandbox
        .cmd()
        .arg("--config")
        .arg(&config)
        .arg("create")
        .arg("--quiz")
        .arg(&quiz)
        .assert()
        .success()
        .stdout(predicate::str::contains("Published \"Capitals\" (3 questions)"));
}

#[test]
fn missing_config_file() {
    Sandbox::new()
        .cmd()
        .arg("--config")
        .arg("nope.toml")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn help_output() {
    quizwiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz authoring, taking, and grading"));
}

#[test]
fn version_output() {
    quizwiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizwiz"));
}
