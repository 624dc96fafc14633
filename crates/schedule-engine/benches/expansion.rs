use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use schedule_engine::{find_conflicts, weekly_schedule_dates, ScheduleContext};
use std::hint::black_box;

const ALL_DAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

fn bench_weekly_repeat(c: &mut Criterion) {
    let ctx = ScheduleContext::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        chrono_tz::America::New_York,
    );

    c.bench_function("weekly_repeat_all_days", |b| {
        b.iter(|| {
            weekly_schedule_dates(
                black_box(&ALL_DAYS),
                Some("09:00"),
                Some("17:00"),
                true,
                &ctx,
            )
        })
    });

    let year: Vec<_> = weekly_schedule_dates(&ALL_DAYS, Some("09:00"), Some("17:00"), true, &ctx)
        .into_iter()
        .map(|i| i.at("clinic"))
        .collect();
    let shifted: Vec<_> = weekly_schedule_dates(&ALL_DAYS, Some("16:00"), Some("18:00"), true, &ctx)
        .into_iter()
        .map(|i| i.at("clinic"))
        .collect();

    c.bench_function("find_conflicts_year_by_year", |b| {
        b.iter(|| find_conflicts(black_box(&year), black_box(&shifted)))
    });
}

criterion_group!(benches, bench_weekly_repeat);
criterion_main!(benches);
