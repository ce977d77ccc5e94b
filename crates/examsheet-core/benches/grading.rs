use criterion::{black_box, criterion_group, criterion_main, Criterion};

use examsheet_core::engine::GradingEngine;
use examsheet_core::model::{Section, SubmittedAnswers, OPTION_LETTERS};

fn answer_key(questions: usize) -> Vec<String> {
    (0..questions)
        .map(|i| OPTION_LETTERS[i % 4].to_string())
        .collect()
}

fn sections(questions: usize, per_section: usize) -> Vec<Section> {
    (0..questions / per_section)
        .map(|s| Section::new(format!("Section {s}"), s * per_section + 1, (s + 1) * per_section))
        .collect()
}

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    for questions in [20, 200, 2000] {
        let key = answer_key(questions);
        let layout = sections(questions, 10);
        let engine = GradingEngine::new(&key, &layout).unwrap();
        let answers = SubmittedAnswers::from_letters(
            (0..questions).map(|i| OPTION_LETTERS[i % 3].to_string()),
        );

        group.bench_function(format!("questions={questions}"), |b| {
            b.iter(|| engine.grade(black_box(&answers)))
        });
    }

    group.finish();
}

fn bench_engine_new(c: &mut Criterion) {
    let key = answer_key(2000);
    let layout = sections(2000, 10);

    c.bench_function("engine_new/sections=200", |b| {
        b.iter(|| GradingEngine::new(black_box(&key), black_box(&layout)))
    });
}

criterion_group!(benches, bench_grade, bench_engine_new);
criterion_main!(benches);
