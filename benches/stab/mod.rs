use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use stabtree::{Interval, IntervalMultiMap};

use crate::Lfsr;

const N_LOOKUPS: usize = 1_000;

#[derive(Debug)]
struct BenchName {
    bench_name: String,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

/// A list of pairs scanned in full for each query.
#[derive(Debug, Default)]
struct BruteForce(Vec<(Interval<u32>, usize)>);

impl BruteForce {
    fn collect_query_values<'a>(&'a self, point: &u32, out: &mut Vec<&'a usize>) {
        out.extend(
            self.0
                .iter()
                .filter(|(i, _)| i.contains(point))
                .map(|(_, v)| v),
        );
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("stab");

    for n_values in [100, 1_000, 10_000] {
        bench_short(&mut g, n_values);
        bench_long(&mut g, n_values);
    }
}

macro_rules! stab_bench {
    (
        $name:ident,
        $max_len:expr
    ) => {
        paste::paste! {
            /// Compare stabbing queries against a brute-force scan of the
            /// same `n_values` intervals.
            fn [<bench_ $name>]<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
            where
                M: Measurement,
            {
                let mut rand = Lfsr::default();
                let mut t = IntervalMultiMap::with_capacity(n_values);
                let mut reference = BruteForce::default();

                for v in 0..n_values {
                    let i = rand.next_interval($max_len);
                    t.insert(i, v);
                    reference.0.push((i, v));
                }

                let points = (0..N_LOOKUPS)
                    .map(|_| rand.next() as u32)
                    .collect::<Vec<_>>();

                // Lookups per second
                g.throughput(Throughput::Elements(N_LOOKUPS as _));

                let bench_name = BenchName {
                    bench_name: format!("{}_tree", stringify!($name)),
                    n_values,
                };
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    let mut out = Vec::new();
                    b.iter(|| {
                        for p in &points {
                            out.clear();
                            t.collect_query_values(p, &mut out);
                            black_box(&out);
                        }
                    })
                });

                let bench_name = BenchName {
                    bench_name: format!("{}_brute_force", stringify!($name)),
                    n_values,
                };
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    let mut out = Vec::new();
                    b.iter(|| {
                        for p in &points {
                            out.clear();
                            reference.collect_query_values(p, &mut out);
                            black_box(&out);
                        }
                    })
                });
            }
        }
    };
}

stab_bench!(short, 100);
stab_bench!(long, 10_000);
