//! Benchmarks for the asset VNS algorithm.

#[cfg(feature = "bench")]
extern crate criterion;

use asset_vns::config::{Config, Variant};
use asset_vns::construction::generate_initial;
use asset_vns::local_search::LocalSearch;
use asset_vns::objective::Objective;
use asset_vns::problem::{Location, Problem};
use asset_vns::VnsAlgorithm;
#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create a benchmark problem with assets on a grid and bases on a coarser grid.
fn create_benchmark_problem(size: usize) -> Problem {
    let grid_size = (size as f64).sqrt().ceil() as usize;
    let assets: Vec<Location> = (0..size)
        .map(|i| Location::new((i % grid_size) as f64 * 10.0, (i / grid_size) as f64 * 10.0))
        .collect();

    let n_bases = (size / 5).max(2);
    let base_grid = (n_bases as f64).sqrt().ceil() as usize;
    let spacing = grid_size as f64 * 10.0 / base_grid as f64;
    let bases: Vec<Location> = (0..n_bases)
        .map(|j| Location::new((j % base_grid) as f64 * spacing, (j / base_grid) as f64 * spacing))
        .collect();

    Problem::from_locations(&assets, &bases, (size / 10).max(2), 0.3)
        .expect("benchmark problem is valid")
}

#[cfg(feature = "bench")]
fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [50, 100, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let mut rng = ChaCha8Rng::seed_from_u64(1);

            b.iter(|| generate_initial(&problem, &mut rng).expect("construction succeeds"));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("vnd");

    for size in [30, 60].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let solution = generate_initial(&problem, &mut rng).expect("construction succeeds");
            let local_search = LocalSearch::new(Objective::Distance);

            b.iter(|| local_search.vnd(&problem, solution.clone()));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("convergence");
    group.sample_size(10);

    for variant in [Variant::Vns, Variant::Gvns] {
        group.bench_with_input(
            BenchmarkId::from_parameter(variant),
            &variant,
            |b, &variant| {
                let problem = create_benchmark_problem(40);
                let config = Config::new()
                    .with_variant(variant)
                    .with_max_iterations(20)
                    .with_max_no_improve(5)
                    .with_seed(3);

                b.iter(|| {
                    let mut algorithm = VnsAlgorithm::new(&problem, config.clone());
                    algorithm.run().expect("run succeeds")
                });
            },
        );
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(
    benches,
    benchmark_construction,
    benchmark_local_search,
    benchmark_convergence
);

#[cfg(feature = "bench")]
criterion_main!(benches);
