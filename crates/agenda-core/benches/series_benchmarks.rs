use agenda_core::models::{EditScope, EventDraft, EventPatch, Repetition};
use agenda_core::series::{apply_scoped_edit, expand_series, resolve_scoped_delete};
use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uuid::Uuid;

fn bench_draft() -> EventDraft {
    EventDraft {
        calendar_id: Uuid::now_v7(),
        name: "Benchmark Event".to_string(),
        description: Some("generated for benchmarking".to_string()),
        date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        color: "teal".to_string(),
    }
}

fn bench_expand_daily(c: &mut Criterion) {
    let draft = bench_draft();

    c.bench_function("expand_series_daily_730", |b| {
        b.iter(|| expand_series(black_box(&draft), black_box(Repetition::Daily)).unwrap())
    });
}

fn bench_expand_monthly_with_skips(c: &mut Criterion) {
    let draft = bench_draft();

    c.bench_function("expand_series_monthly_day_31", |b| {
        b.iter(|| expand_series(black_box(&draft), black_box(Repetition::Monthly)).unwrap())
    });
}

fn bench_scoped_edit_all(c: &mut Criterion) {
    let events = expand_series(&bench_draft(), Repetition::Daily).unwrap();
    let target = events[events.len() / 2].id;
    let patch = EventPatch {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };

    c.bench_function("apply_scoped_edit_all_730", |b| {
        b.iter(|| {
            apply_scoped_edit(
                black_box(&events),
                black_box(target),
                black_box(&patch),
                black_box(EditScope::All),
            )
            .unwrap()
        })
    });
}

fn bench_scoped_delete_future(c: &mut Criterion) {
    let events = expand_series(&bench_draft(), Repetition::Daily).unwrap();
    let target = events[events.len() / 2].id;

    c.bench_function("resolve_scoped_delete_future_730", |b| {
        b.iter(|| {
            resolve_scoped_delete(
                black_box(&events),
                black_box(target),
                black_box(EditScope::Future),
            )
            .unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_expand_daily,
    bench_expand_monthly_with_skips,
    bench_scoped_edit_all,
    bench_scoped_delete_future
);
criterion_main!(benches);
