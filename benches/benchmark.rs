// Performance benchmarks for fitting, encoding and scoring fingerprints
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use statprint::prelude::*;
use statprint::pairwise;

const FEATURES: [&str; 8] = ["AVG", "OBP", "SLG", "HR", "RBI", "SB", "BB%", "K%"];

fn generate_random_record() -> Record {
    let mut rng = rand::rng();
    FEATURES
        .iter()
        .map(|&feature| (feature, rng.random_range(0.0..1.0)))
        .collect()
}

fn generate_population(size: usize) -> Vec<Record> {
    (0..size).map(|_| generate_random_record()).collect()
}

fn config() -> FingerprintConfig {
    FingerprintConfig::new(
        FEATURES
            .iter()
            .map(|&feature| QuantileSpec::new(feature, vec![0.25, 0.5, 0.75, 0.9]))
            .collect(),
    )
}

fn benchmark_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    let config = config();

    for size in [100, 1000, 10000].iter() {
        let population = generate_population(*size);
        group.bench_with_input(BenchmarkId::new("pipeline", size), &population, |b, population| {
            b.iter(|| {
                let pipeline = FingerprintPipeline::fit(black_box(population), &config).unwrap();
                black_box(pipeline);
            });
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    // Setup: fit on 10k records
    let population = generate_population(10000);
    let pipeline = FingerprintPipeline::fit(&population, &config()).unwrap();
    let record = generate_random_record();

    for encoding in [Encoding::Binary, Encoding::Binned, Encoding::Normalized, Encoding::Percentile] {
        group.bench_function(format!("{:?}", encoding).to_lowercase(), |b| {
            b.iter(|| {
                let fp = pipeline.encode(black_box(&record), encoding).unwrap();
                black_box(fp);
            });
        });
    }

    group.finish();
}

fn benchmark_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");

    let population = generate_population(1000);
    let pipeline = FingerprintPipeline::fit(&population, &config()).unwrap();

    for size in [100, 500].iter() {
        let fingerprints: Vec<Vec<u8>> = population[..*size]
            .iter()
            .map(|record| pipeline.binary(record).unwrap())
            .collect();

        group.bench_with_input(BenchmarkId::new("jaccard", size), &fingerprints, |b, fps| {
            b.iter(|| {
                let scores = pairwise(black_box(fps), Metric::Jaccard).unwrap();
                black_box(scores);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_fit, benchmark_encode, benchmark_pairwise);
criterion_main!(benches);
