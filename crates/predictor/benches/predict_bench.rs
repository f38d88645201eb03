use criterion::{criterion_group, criterion_main, Criterion};

use models::prediction::{LooseInt, PredictionRequest};
use predictor::dataset::StartupRecord;
use predictor::forest::ForestParams;
use predictor::training::train;

fn records() -> Vec<StartupRecord> {
    let industries = ["IT", "Fintech", "Agro", "Health", "Retail"];
    let countries = ["USA", "India", "UK", "Germany"];
    (0..500)
        .map(|i| StartupRecord {
            founded_year: 2000.0 + (i % 24) as f64,
            funding_usd: ((i * 7919) % 5_000_000) as f64,
            industry: industries[i % industries.len()].to_string(),
            country: countries[i % countries.len()].to_string(),
            status: if (i * 31) % 7 < 3 { "Succeeded" } else { "Failed" }.to_string(),
        })
        .collect()
}

fn bench_predict(c: &mut Criterion) {
    let bundle = train(&records(), &ForestParams::default(), 0.2).expect("train").bundle;
    let req = PredictionRequest {
        founded_year: LooseInt(2015),
        funding_usd: LooseInt(2_500_000),
        industry: "IT".into(),
        country: "USA".into(),
    };

    c.bench_function("forest_success_probability", |b| {
        b.iter(|| bundle.success_probability(&req).expect("predict"));
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
