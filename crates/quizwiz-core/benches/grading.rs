use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Utc;
use quizwiz_core::grading::{grade, review};
use quizwiz_core::model::{Answer, AnswerSet, Question, QuestionKind, Quiz, QuizStatus};

fn make_quiz(n: usize) -> Quiz {
    let questions = (0..n)
        .map(|i| {
            let kind = match i % 3 {
                0 => QuestionKind::MultipleChoice,
                1 => QuestionKind::TrueFalse,
                _ => QuestionKind::ShortAnswer,
            };
            Question {
                id: format!("q{i}"),
                text: format!("Question {i}"),
                kind,
                options: match kind {
                    QuestionKind::MultipleChoice => {
                        vec!["A".into(), "B".into(), "C".into(), "D".into()]
                    }
                    QuestionKind::TrueFalse => vec![],
                    QuestionKind::ShortAnswer => vec![format!("Answer {i}")],
                },
                correct_answer: i % 2,
            }
        })
        .collect();

    Quiz {
        id: "bench".into(),
        title: "Bench".into(),
        description: String::new(),
        questions,
        created_by: "bench".into(),
        created_by_name: "Bench".into(),
        created_at: Utc::now(),
        status: QuizStatus::Published,
    }
}

fn make_answers(quiz: &Quiz) -> AnswerSet {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = match q.kind {
                QuestionKind::MultipleChoice => Answer::MultipleChoice { index: i % 4 },
                QuestionKind::TrueFalse => Answer::TrueFalse { index: i % 2 },
                QuestionKind::ShortAnswer => Answer::short(format!("  answer {i} ")),
            };
            (q.id.clone(), answer)
        })
        .collect()
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    for n in [10, 100, 1000] {
        let quiz = make_quiz(n);
        let answers = make_answers(&quiz);
        group.bench_function(format!("questions={n}"), |b| {
            b.iter(|| grade(black_box(&quiz), black_box(&answers)))
        });
    }

    let quiz = make_quiz(100);
    group.bench_function("empty_answers", |b| {
        b.iter(|| grade(black_box(&quiz), black_box(&AnswerSet::new())))
    });

    group.finish();
}

fn bench_review(c: &mut Criterion) {
    let quiz = make_quiz(100);
    let answers = make_answers(&quiz);
    c.bench_function("review/questions=100", |b| {
        b.iter(|| review(black_box(&quiz), black_box(&answers)))
    });
}

criterion_group!(benches, bench_grade, bench_review);
criterion_main!(benches);
