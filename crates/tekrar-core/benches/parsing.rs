use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tekrar_core::events::parse_timestamp;
use tekrar_core::results::parse_csv;

fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    let small = generate_results_csv(10);
    let medium = generate_results_csv(100);
    let large = generate_results_csv(1000);
    let quoted = generate_quoted_csv(500);

    group.bench_function("10_rows", |b| b.iter(|| parse_csv(black_box(&small))));
    group.bench_function("100_rows", |b| b.iter(|| parse_csv(black_box(&medium))));
    group.bench_function("1000_rows", |b| b.iter(|| parse_csv(black_box(&large))));
    group.bench_function("500_quoted_rows", |b| b.iter(|| parse_csv(black_box(&quoted))));

    group.finish();
}

fn bench_parse_timestamp(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_timestamp");

    group.bench_function("iso_z", |b| {
        b.iter(|| parse_timestamp(black_box("2026-02-25T14:30:00Z")))
    });
    group.bench_function("space_utc", |b| {
        b.iter(|| parse_timestamp(black_box("2026-02-25 14:30:00")))
    });
    group.bench_function("us_sheet", |b| {
        b.iter(|| parse_timestamp(black_box("02/25/2026 14:30")))
    });
    group.bench_function("date_only", |b| {
        b.iter(|| parse_timestamp(black_box("2026-02-25")))
    });

    group.finish();
}

fn generate_results_csv(n: usize) -> String {
    let mut s = String::from("timestamp,word_id,mode,correct\n");
    for i in 0..n {
        let day = (i % 28) + 1;
        let minute = i % 60;
        let mode = if i % 2 == 0 { "en-tr" } else { "tr-en" };
        let correct = if i % 3 == 0 { "false" } else { "true" };
        s.push_str(&format!(
            "2026-01-{day:02} 10:{minute:02}:00,word-{i},{mode},{correct}\n"
        ));
    }
    s
}

fn generate_quoted_csv(n: usize) -> String {
    let mut s = String::from("timestamp,word_id,mode,correct\n");
    for i in 0..n {
        s.push_str(&format!(
            "\"2026-01-15 10:00:00\",\"word, the {i}th\",\"en-tr\",\"true\"\n"
        ));
    }
    s
}

criterion_group!(benches, bench_parse_csv, bench_parse_timestamp);
criterion_main!(benches);
