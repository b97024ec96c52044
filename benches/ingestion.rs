use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tabular_reshaper::ingestion::csv::ingest_delimited_from_str;
use tabular_reshaper::ingestion::json::ingest_json_from_str;
use tabular_reshaper::processing::coerce_numbers;

fn csv_input(rows: usize) -> String {
    let mut out = String::from("month,apples,pears,plums\n");
    for i in 0..rows {
        out.push_str(&format!("m{i},{},{}.5,n/a\n", i % 40, i % 9));
    }
    out
}

fn ndjson_input(rows: usize) -> String {
    (0..rows)
        .map(|i| format!("{{\"id\":{i},\"user\":{{\"name\":\"u{}\"}},\"score\":\"{}\"}}\n", i % 100, i % 7))
        .collect()
}

fn bench_csv(c: &mut Criterion) {
    let input = csv_input(10_000);
    c.bench_function("csv_ingest_10k", |b| {
        b.iter(|| ingest_delimited_from_str(black_box(&input), b',', None).unwrap())
    });

    let ds = ingest_delimited_from_str(&input, b',', None).unwrap();
    c.bench_function("coerce_numbers_10k", |b| b.iter(|| coerce_numbers(black_box(&ds))));
}

fn bench_json(c: &mut Criterion) {
    let input = ndjson_input(10_000);
    c.bench_function("ndjson_ingest_10k", |b| {
        b.iter(|| ingest_json_from_str(black_box(&input), None).unwrap())
    });
}

criterion_group!(benches, bench_csv, bench_json);
criterion_main!(benches);
