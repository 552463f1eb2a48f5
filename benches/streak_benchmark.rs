use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use workout_tracker::models::DateSet;
use workout_tracker::services::{build_rolling_calendar, compute_streak};

fn benchmark_streak_and_calendar(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid date");

    // Three years of history: an unbroken 200-day run ending today,
    // preceded by every other day.
    let mut dates = DateSet::new();
    for back in 0..1100u64 {
        if back < 200 || back % 2 == 0 {
            dates.insert(today - Days::new(back));
        }
    }

    let mut group = c.benchmark_group("progress");

    group.bench_function("long_streak", |b| {
        b.iter(|| compute_streak(black_box(&dates), black_box(today)))
    });

    group.bench_function("rolling_calendar", |b| {
        b.iter(|| build_rolling_calendar(black_box(today), black_box(&dates)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_streak_and_calendar);
criterion_main!(benches);
