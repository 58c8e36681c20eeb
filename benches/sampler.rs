use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use infer_ddl::classifier::ValueTypeClassifier;
use infer_ddl::parser::ValueParser;
use infer_ddl::sampler::SchemaSampler;
use infer_ddl::value::RawValue;

const HEADERS: [&str; 5] = ["id", "ordered_at", "shipped_at", "amount", "status"];

fn generate_orders(rows: usize) -> Vec<Vec<RawValue>> {
    (0..rows)
        .map(|i| {
            let status = match i % 3 {
                0 => "shipped",
                1 => "pending",
                _ => "processing",
            };
            let day = (i % 28) + 1;
            let hour = i % 24;
            vec![
                RawValue::text(i.to_string()),
                RawValue::text(format!("2024-01-{day:02}")),
                RawValue::text(format!("2024-01-{day:02} {hour:02}:15:00")),
                RawValue::text(format!("{}.{:02}", i % 500, i % 100)),
                RawValue::text(status),
            ]
        })
        .collect()
}

fn sampler() -> SchemaSampler {
    SchemaSampler::new(&HEADERS, ValueTypeClassifier::new(ValueParser::default()))
}

fn bench_fast_path(c: &mut Criterion) {
    let rows = generate_orders(20_000);
    let mut group = c.benchmark_group("sample_rows");

    group.bench_function("cached_type_fast_path", |b| {
        b.iter_batched(
            sampler,
            |mut sampler| {
                for row in &rows {
                    sampler.add_row(row);
                }
                sampler.finish()
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("full_classification", |b| {
        b.iter_batched(
            || sampler().without_fast_path(),
            |mut sampler| {
                for row in &rows {
                    sampler.add_row(row);
                }
                sampler.finish()
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_fast_path);
criterion_main!(benches);
