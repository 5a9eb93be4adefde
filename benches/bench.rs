// Criterion benchmarks for Trek Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trek_match::core::{calculate_match_score, Matcher, TrekCategories};
use trek_match::models::{
    AgeGroup, Experience, FitnessLevel, HealthIssue, PreferenceSet, Trek, TrekType,
};

const DIFFICULTIES: [&str; 4] = ["Easy", "Moderate", "Hard", "Easy–Moderate"];

fn create_catalog(size: usize) -> Vec<Trek> {
    (0..size)
        .map(|i| Trek::new(format!("Trek {}", i), Some(DIFFICULTIES[i % DIFFICULTIES.len()])))
        .collect()
}

fn create_preferences() -> PreferenceSet {
    PreferenceSet {
        age_group: AgeGroup::From41To60,
        health_issues: vec![HealthIssue::Diabetes, HealthIssue::JointKnee],
        fitness_level: FitnessLevel::Medium,
        experience: Experience::FewTreks,
        trek_type_interests: vec![TrekType::ScenicWaterfall, TrekType::FortHistory],
    }
}

fn bench_score_single(c: &mut Criterion) {
    let categories = TrekCategories::default();
    let trek = Trek::new("Harishchandragad Fort", Some("Hard"));
    let preferences = create_preferences();

    c.bench_function("score_single_trek", |b| {
        b.iter(|| {
            calculate_match_score(
                black_box(&trek),
                black_box(&preferences),
                black_box(&categories),
            )
        });
    });
}

fn bench_rank(c: &mut Criterion) {
    let matcher = Matcher::with_default_tables();
    let preferences = create_preferences();
    let mut group = c.benchmark_group("rank_catalog");

    for size in [28, 100, 1000] {
        let catalog = create_catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| matcher.rank(black_box(catalog), black_box(&preferences)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score_single, bench_rank);
criterion_main!(benches);
