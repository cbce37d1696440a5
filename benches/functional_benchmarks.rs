//! # Toolkit Performance Benchmarks
//!
//! Compares the toolkit's `each`-based operations against hand-written iterator
//! chains to measure:
//! - Filtering and mapping overhead of the callback traversal
//! - Reduce based quantifiers (`every`, `some`, `contains`) versus short-circuiting loops
//! - Memoization cache efficiency and hit rates
//! - Quadratic set operations (`uniq`, `intersection`) at growing sizes
//! - Flattening of deep and wide nested input

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fpkit::functional::prelude::*;
use itertools::Itertools;
use std::collections::HashMap;
use std::time::Duration;

/// Test record for benchmarking
#[derive(Debug, Clone)]
pub struct BenchmarkRecord {
    pub id: u32,
    pub age: u32,
    pub active: bool,
    pub score: f64,
}

impl BenchmarkRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            age: 20 + (id % 50),
            active: id % 3 == 0,
            score: (id as f64) * 1.5 + 10.0,
        }
    }
}

/// Generate test data for benchmarking
pub fn generate_test_data(size: usize) -> Vec<BenchmarkRecord> {
    (0..size).map(|i| BenchmarkRecord::new(i as u32)).collect()
}

/// Benchmark: filter/map through the toolkit versus std iterators
pub fn benchmark_filter_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_map");

    for size in [100, 1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("toolkit", size), &data, |b, data| {
            b.iter(|| {
                let active = filter(data, |record| record.active && record.age > 25);
                black_box(map(&active, |record| record.score * 2.0))
            })
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &data, |b, data| {
            b.iter(|| {
                let result: Vec<f64> = data
                    .iter()
                    .filter(|record| record.active && record.age > 25)
                    .map(|record| record.score * 2.0)
                    .collect();
                black_box(result)
            })
        });
    }

    group.finish();
}

/// Benchmark: reduce and the reduce based quantifiers
///
/// `every` and `contains` visit every element; the iterator versions stop early.
pub fn benchmark_reduce_quantifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_quantifiers");

    for size in [1000, 10000].iter() {
        let data: Vec<u64> = (0..*size as u64).collect();

        group.bench_with_input(BenchmarkId::new("reduce_sum", size), &data, |b, data| {
            b.iter(|| black_box(reduce(data, |total, n| total + n, 0u64)))
        });

        group.bench_with_input(BenchmarkId::new("iterator_sum", size), &data, |b, data| {
            b.iter(|| black_box(data.iter().sum::<u64>()))
        });

        group.bench_with_input(BenchmarkId::new("contains_first", size), &data, |b, data| {
            b.iter(|| black_box(contains(data, &0)))
        });

        group.bench_with_input(BenchmarkId::new("any_first", size), &data, |b, data| {
            b.iter(|| black_box(data.iter().any(|n| *n == 0)))
        });

        group.bench_with_input(BenchmarkId::new("every", size), &data, |b, data| {
            b.iter(|| black_box(every(data, |n| *n < u64::MAX)))
        });
    }

    group.finish();
}

/// Benchmark: Memoization cache efficiency
///
/// Measures the wrapped computation without a cache, through `memoize`, and through
/// the string-keyed `memoize_by` at several hit rates.
pub fn benchmark_memoization_efficiency(c: &mut Criterion) {
    let mut group = c.benchmark_group("memoization");
    group.measurement_time(Duration::from_secs(5));

    fn expensive_computation(n: u32) -> u64 {
        let mut result: u64 = 1;
        for i in 1..=n as u64 {
            result = result.wrapping_mul(i);
        }
        result
    }

    for cache_hit_rate in [0.0, 0.5, 0.9].iter() {
        let test_size = 1000;
        let cache_size = ((test_size as f64) * cache_hit_rate) as usize;
        let mut sequence: Vec<u32> = Vec::new();

        for i in 0..cache_size {
            sequence.push((i % 20) as u32 + 1);
        }
        for i in cache_size..test_size {
            sequence.push(((i - cache_size) as u32) + 20);
        }

        let label = format!("{:.0}%_hits", cache_hit_rate * 100.0);

        group.bench_with_input(BenchmarkId::new("no_cache", &label), &sequence, |b, sequence| {
            b.iter(|| {
                let results: Vec<u64> = sequence.iter().map(|&n| expensive_computation(n)).collect();
                black_box(results)
            })
        });

        group.bench_with_input(BenchmarkId::new("memoize", &label), &sequence, |b, sequence| {
            b.iter(|| {
                let mut cached = memoize(expensive_computation);
                let results: Vec<u64> = sequence.iter().map(|&n| cached.call(n)).collect();
                black_box(results)
            })
        });

        group.bench_with_input(
            BenchmarkId::new("memoize_by_string", &label),
            &sequence,
            |b, sequence| {
                b.iter(|| {
                    let mut cached = memoize_by(expensive_computation, |n: &u32| n.to_string());
                    let results: Vec<u64> = sequence.iter().map(|&n| cached.call(n)).collect();
                    black_box(results)
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("hashmap", &label), &sequence, |b, sequence| {
            b.iter(|| {
                let mut cache: HashMap<u32, u64> = HashMap::new();
                let results: Vec<u64> = sequence
                    .iter()
                    .map(|&n| *cache.entry(n).or_insert_with(|| expensive_computation(n)))
                    .collect();
                black_box(results)
            })
        });
    }

    group.finish();
}

/// Benchmark: uniq and intersection scale quadratically, `unique()` hashes
pub fn benchmark_set_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_operations");

    for size in [100, 1000, 5000].iter() {
        let data: Vec<u32> = (0..*size as u32).map(|i| i % 97).collect();
        let other: Vec<u32> = (0..*size as u32).step_by(2).collect();

        group.bench_with_input(BenchmarkId::new("uniq", size), &data, |b, data| {
            b.iter(|| black_box(uniq(data)))
        });

        group.bench_with_input(BenchmarkId::new("itertools_unique", size), &data, |b, data| {
            b.iter(|| {
                let result: Vec<u32> = data.iter().copied().unique().collect();
                black_box(result)
            })
        });

        group.bench_with_input(
            BenchmarkId::new("intersection", size),
            &(data.clone(), other.clone()),
            |b, (data, other)| {
                b.iter(|| black_box(intersection(&[data.as_slice(), other.as_slice()])))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("difference", size),
            &(data.clone(), other.clone()),
            |b, (data, other)| {
                b.iter(|| black_box(difference(data.clone(), &[other.as_slice()])))
            },
        );
    }

    group.finish();
}

fn deep_nesting(depth: usize) -> Vec<Nested<u32>> {
    let mut current = vec![Nested::Item(0)];
    for level in 1..depth {
        current = vec![Nested::Item(level as u32), Nested::List(current)];
    }
    current
}

fn wide_nesting(width: usize) -> Vec<Nested<u32>> {
    (0..width as u32)
        .map(|i| Nested::List(vec![Nested::Item(i), Nested::List(vec![Nested::Item(i + 1)])]))
        .collect()
}

/// Benchmark: flatten over deep chains and wide shallow lists
pub fn benchmark_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for size in [100, 1000].iter() {
        let deep = deep_nesting(*size);
        let wide = wide_nesting(*size);

        group.bench_with_input(BenchmarkId::new("deep", size), &deep, |b, nested| {
            b.iter(|| black_box(flatten(nested)))
        });

        group.bench_with_input(BenchmarkId::new("wide", size), &wide, |b, nested| {
            b.iter(|| black_box(flatten(nested)))
        });
    }

    group.finish();
}

/// Benchmark: stable numeric sorting of records and mappings
pub fn benchmark_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);
        let rows: Vec<HashMap<&'static str, f64>> = data
            .iter()
            .map(|record| HashMap::from([("id", record.id as f64), ("score", -record.score)]))
            .collect();

        group.bench_with_input(BenchmarkId::new("sort_by", size), &data, |b, data| {
            b.iter(|| black_box(sort_by(data, |record| -record.score)))
        });

        group.bench_with_input(BenchmarkId::new("sort_by_property", size), &rows, |b, rows| {
            b.iter(|| black_box(sort_by_property(rows, &"score")))
        });

        group.bench_with_input(BenchmarkId::new("sorted_by_key", size), &data, |b, data| {
            b.iter(|| {
                let result: Vec<&BenchmarkRecord> = data
                    .iter()
                    .sorted_by(|a, b| b.score.total_cmp(&a.score))
                    .collect();
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_filter_map,
    benchmark_reduce_quantifiers,
    benchmark_memoization_efficiency,
    benchmark_set_operations,
    benchmark_flatten,
    benchmark_sorting
);

criterion_main!(benches);
