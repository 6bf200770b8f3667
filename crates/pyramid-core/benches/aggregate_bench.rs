use std::collections::BTreeMap;

use pyramid_core::{bucket, combine, sample, AgeDomain, BucketRule, BucketSpec};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_series(bands: usize, series: usize) -> BTreeMap<String, Vec<u64>> {
    (0..series)
        .map(|s| {
            let values = (0..bands).map(|i| ((bands - i) as u64) * 1_000 + s as u64).collect();
            (format!("series_{s}"), values)
        })
        .collect()
}

fn bench_reference(c: &mut Criterion) {
    let dataset = sample::europe_africa();
    let spec = BucketSpec::reference(&dataset.domain);
    c.bench_function("reference_combine_bucket", |b| {
        b.iter(|| {
            let combined = dataset.combine().unwrap();
            black_box(bucket(&combined, &spec).unwrap())
        })
    });
}

fn bench_bucket(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine_bucket");
    for &bands in &[21usize, 1_000usize, 10_000usize] {
        let domain = AgeDomain::new(0, 1, bands);
        let data = gen_series(bands, 4);
        // Merge every group of ten consecutive bands.
        let spec = (0..bands as u32).step_by(10).fold(BucketSpec::new(), |spec, lo| {
            spec.with_rule(BucketRule::merge_range(&domain, lo, lo + 10))
        });
        group.bench_with_input(BenchmarkId::from_parameter(format!("bands{bands}")), &bands, |b, _| {
            b.iter_batched(
                || data.clone(),
                |d| {
                    let combined = combine(&domain, &d).unwrap();
                    let _ = black_box(bucket(&combined, &spec).unwrap());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reference, bench_bucket);
criterion_main!(benches);
