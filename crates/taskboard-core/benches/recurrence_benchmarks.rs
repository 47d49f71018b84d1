use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use taskboard_core::classify::{sort_tasks, tasks_for_date};
use taskboard_core::models::{
    RecurrenceRule, Scope, Task, TaskPriority, TaskStatus, TaskType,
};
use taskboard_core::recurrence::{applies_to_date, next_occurrence, preview_occurrences};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

fn sample_rules() -> Vec<(&'static str, RecurrenceRule)> {
    vec![
        ("weekly", RecurrenceRule::weekly([1, 3, 5])),
        ("biweekly", RecurrenceRule::biweekly([2])),
        ("monthly", RecurrenceRule::monthly(Some(31))),
        ("quarterly", RecurrenceRule::quarterly(Some(15))),
        ("business_days", RecurrenceRule::business_days(3)),
        ("nth_weekday_month", RecurrenceRule::nth_weekday(4, 4, Scope::Month)),
        ("nth_weekday_year", RecurrenceRule::nth_weekday(2, 1, Scope::Year)),
    ]
}

fn random_task(rng: &mut fastrand::Rng, index: usize) -> Task {
    let priorities = [
        TaskPriority::Critical,
        TaskPriority::High,
        TaskPriority::Medium,
        TaskPriority::Low,
        TaskPriority::None,
    ];
    let statuses = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Waiting,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];
    let recurring = rng.bool();
    let weekday = rng.u32(0..7);

    Task {
        id: format!("task-{}", index),
        title: format!("Benchmark task {}", index),
        task_type: if recurring {
            TaskType::Recurring
        } else {
            TaskType::OneOff
        },
        recurrence: recurring.then(|| RecurrenceRule::weekly([weekday])),
        priority: priorities[rng.usize(..priorities.len())],
        status: statuses[rng.usize(..statuses.len())],
        due_date: start_date().checked_add_days(chrono::Days::new(rng.u64(0..60))),
        sort_order: index as i64,
        ..Default::default()
    }
}

fn bench_applies_to_date(c: &mut Criterion) {
    let mut group = c.benchmark_group("applies_to_date_year");

    for (name, rule) in sample_rules() {
        group.bench_with_input(BenchmarkId::new("pattern", name), &rule, |b, rule| {
            b.iter(|| {
                start_date()
                    .iter_days()
                    .take(365)
                    .filter(|day| applies_to_date(black_box(rule), *day))
                    .count()
            })
        });
    }

    group.finish();
}

fn bench_next_occurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_occurrence");

    for (name, rule) in sample_rules() {
        group.bench_with_input(BenchmarkId::new("pattern", name), &rule, |b, rule| {
            b.iter(|| next_occurrence(black_box(rule), black_box(start_date())))
        });
    }

    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let rule = RecurrenceRule::nth_weekday(3, 2, Scope::Quarter);

    c.bench_function("preview_occurrences_52", |b| {
        b.iter(|| preview_occurrences(black_box(&rule), black_box(start_date()), 52))
    });
}

fn bench_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("board");
    let mut rng = fastrand::Rng::with_seed(42);

    for size in [100usize, 1_000, 10_000] {
        let tasks: Vec<Task> = (0..size).map(|i| random_task(&mut rng, i)).collect();

        group.bench_with_input(BenchmarkId::new("sort_tasks", size), &tasks, |b, tasks| {
            b.iter(|| sort_tasks(black_box(tasks.clone())))
        });
        group.bench_with_input(
            BenchmarkId::new("tasks_for_date", size),
            &tasks,
            |b, tasks| b.iter(|| tasks_for_date(black_box(tasks), black_box(start_date()))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_applies_to_date,
    bench_next_occurrence,
    bench_preview,
    bench_board
);
criterion_main!(benches);
