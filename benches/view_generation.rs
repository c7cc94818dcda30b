//! Benchmarks for view generation.
//!
//! These benchmarks measure generating and serializing list views of various
//! sizes, and loading definition files with many templated views.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jenkins_job_addons::config::parse_mapping;
use jenkins_job_addons::definitions::Definitions;
use jenkins_job_addons::registry::Registry;

/// A list view with defaults only.
const MINIMAL_VIEW: &str = "name: Minimal";

/// A list view using filters, explicit jobs and extra columns.
const FILTERED_VIEW: &str = r#"
name: Filtered
description: Services owned by the platform team
job-name: [web-deploy, Api-build, worker, Scheduler]
job-filters:
  - most-recent:
      max-to-include: 10
  - job-status:
      failed: true
      unstable: true
  - regex-job:
      regex: "platform-.*"
  - user-permissions:
      build: true
columns:
  - status
  - weather
  - job
  - extra-tests-total
  - extra-build-description
  - extra-build-parameter: BUILD_ENV
regex: "platform-.*"
"#;

/// Generate a list view with `jobs` explicit job names.
fn generate_large_view(jobs: usize) -> String {
    let mut view = String::from("name: Large\njob-name:\n");
    for i in (0..jobs).rev() {
        view.push_str(&format!("  - Job-{}\n", i));
    }
    view
}

/// Generate a definitions file with one folder holding `views` templated views.
fn generate_definitions(views: usize) -> String {
    let mut definitions = String::from(
        r#"
- view-template:
    name: "{team}-list"
    view-type: sublist
    regex: "{team}-.*"
    parent: folder
- job:
    name: teams
    views:
"#,
    );
    for i in 0..views {
        definitions.push_str(&format!("      - \"{{team}}-list\":\n          team: team{}\n", i));
    }
    definitions
}

fn bench_view_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_generation");
    let registry = Registry::default();

    let minimal = parse_mapping(MINIMAL_VIEW).unwrap();
    group.bench_function("minimal", |b| {
        b.iter(|| registry.dispatch_view("sublist", black_box(&minimal)))
    });

    let filtered = parse_mapping(FILTERED_VIEW).unwrap();
    group.bench_function("filtered", |b| {
        b.iter(|| registry.dispatch_view("sublist", black_box(&filtered)))
    });

    group.bench_function("filtered_serialized", |b| {
        b.iter(|| {
            registry
                .dispatch_view("sublist", black_box(&filtered))
                .and_then(|view| view.to_document())
        })
    });

    group.finish();
}

fn bench_job_name_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("job_name_scaling");
    let registry = Registry::default();

    for jobs in [10, 100, 1000] {
        let config = parse_mapping(&generate_large_view(jobs)).unwrap();
        group.bench_with_input(BenchmarkId::new("jobs", jobs), &config, |b, config| {
            b.iter(|| registry.dispatch_view("sublist", black_box(config)))
        });
    }

    group.finish();
}

fn bench_definitions(c: &mut Criterion) {
    let mut group = c.benchmark_group("definitions");

    for views in [5, 50, 200] {
        let yaml = generate_definitions(views);
        group.bench_with_input(BenchmarkId::new("templated_views", views), &yaml, |b, yaml| {
            b.iter(|| {
                Definitions::parse(black_box(yaml)).and_then(|definitions| definitions.generate(None))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_view_generation,
    bench_job_name_scaling,
    bench_definitions
);
criterion_main!(benches);
