use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use stabtree::{AvlMap, IntervalMultiMap};

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    bench: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove");

    for n_values in [100, 1_000, 10_000] {
        bench_map(&mut g, n_values);
        bench_interval_map(&mut g, n_values);
    }
}

/// Measure the time needed to remove every key from an [`AvlMap`] holding
/// `n_values` random keys.
fn bench_map<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let keys = (0..n_values).map(|_| rand.next()).collect::<Vec<_>>();

    let mut t = AvlMap::with_capacity(n_values);
    for k in &keys {
        t.insert(*k, 42_usize);
    }

    let bench_name = BenchName {
        bench: "avl_map",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _)); // Keys removed per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                for k in &keys {
                    assert!(t.remove(k).is_some());
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}

/// Measure the time needed to remove every pair from an [`IntervalMultiMap`]
/// holding `n_values` random intervals.
fn bench_interval_map<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let intervals = (0..n_values)
        .map(|_| rand.next_interval(1_000))
        .collect::<Vec<_>>();

    let mut t = IntervalMultiMap::with_capacity(n_values);
    for i in &intervals {
        t.insert(*i, 42_usize);
    }

    let bench_name = BenchName {
        bench: "interval_multi_map",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                for i in &intervals {
                    assert!(t.remove(i, &42).is_some());
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}
