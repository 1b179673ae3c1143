// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seat_alloc_core::bitset::BitSetIndex;
use std::hint::black_box;

fn random_set(nbits: usize, density: f64, rng: &mut impl Rng) -> BitSetIndex {
    let mut set = BitSetIndex::new(nbits, false);
    for i in 0..nbits {
        if rng.random_bool(density) {
            set.set(i);
        }
    }
    set
}

fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitset_and");
    for &nbits in &[512usize, 2048, 8192] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = random_set(nbits, 0.3, &mut rng);
        let b = random_set(nbits, 0.3, &mut rng);
        group.throughput(Throughput::Elements(nbits as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nbits), &nbits, |bench, _| {
            bench.iter(|| black_box(a.and(black_box(&b))));
        });
    }
    group.finish();
}

fn bench_iter_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitset_iter_ones");
    for &nbits in &[512usize, 2048, 8192] {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let set = random_set(nbits, 0.1, &mut rng);
        group.throughput(Throughput::Elements(nbits as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nbits), &nbits, |bench, _| {
            bench.iter(|| black_box(set.iter_ones().sum::<usize>()));
        });
    }
    group.finish();
}

fn bench_union_of(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let sets: Vec<BitSetIndex> = (0..8).map(|_| random_set(4096, 0.2, &mut rng)).collect();
    let refs: Vec<&BitSetIndex> = sets.iter().collect();
    c.bench_function("bitset_union_of_8x4096", |bench| {
        bench.iter(|| black_box(BitSetIndex::union_of(black_box(&refs)).unwrap()));
    });
}

criterion_group!(benches, bench_intersection, bench_iter_ones, bench_union_of);
criterion_main!(benches);
