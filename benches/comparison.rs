// Copyright © SurrealDB Ltd
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Criterion benchmarks comparing `RbTree` against standard library
//! ordered containers.
//!
//! This benchmark suite compares:
//! - `rbtree::RbTree` - Arena-backed red-black tree with a shared sentinel
//! - `std::collections::BTreeMap<K, usize>` - Standard library B-tree used
//!   as a multiset (key -> copy count), since `RbTree` keeps duplicates
//!
//! All benchmarks are single-threaded; the tree provides no synchronization.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rbtree::RbTree;
use std::collections::BTreeMap;
use std::hint::black_box;

const SEED: u64 = 42;

// ============================================================================
// Helper Functions
// ============================================================================

/// Generate sequential keys from 0 to count-1
fn sequential_keys(count: usize) -> Vec<i64> {
	(0..count as i64).collect()
}

/// Generate random keys using a seeded RNG
fn random_keys(count: usize) -> Vec<i64> {
	let mut rng = StdRng::seed_from_u64(SEED);
	(0..count).map(|_| rng.random()).collect()
}

fn multiset_insert(map: &mut BTreeMap<i64, usize>, key: i64) {
	*map.entry(key).or_default() += 1;
}

fn multiset_remove(map: &mut BTreeMap<i64, usize>, key: &i64) {
	if let Some(count) = map.get_mut(key) {
		*count -= 1;
		if *count == 0 {
			map.remove(key);
		}
	}
}

// ============================================================================
// Insert Benchmarks
// ============================================================================

fn bench_insert(c: &mut Criterion) {
	for (name, generate) in [
		("insert_sequential", sequential_keys as fn(usize) -> Vec<i64>),
		("insert_random", random_keys),
	] {
		let mut group = c.benchmark_group(name);

		for count in [1_000, 10_000, 100_000] {
			let keys = generate(count);
			group.throughput(Throughput::Elements(count as u64));

			group.bench_with_input(BenchmarkId::new("rbtree", count), &keys, |b, keys| {
				b.iter_batched(
					RbTree::<i64>::new,
					|mut tree| {
						for &k in keys {
							black_box(tree.insert(k));
						}
						tree
					},
					criterion::BatchSize::SmallInput,
				)
			});

			group.bench_with_input(BenchmarkId::new("btreemap", count), &keys, |b, keys| {
				b.iter_batched(
					BTreeMap::new,
					|mut map| {
						for &k in keys {
							multiset_insert(&mut map, k);
						}
						map
					},
					criterion::BatchSize::SmallInput,
				)
			});
		}

		group.finish();
	}
}

// ============================================================================
// Lookup Benchmarks
// ============================================================================

fn bench_find(c: &mut Criterion) {
	let mut group = c.benchmark_group("find_random");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		let tree: RbTree<i64> = keys.iter().copied().collect();
		let mut map = BTreeMap::new();
		for &k in &keys {
			multiset_insert(&mut map, k);
		}
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("rbtree", count), &keys, |b, keys| {
			b.iter(|| {
				for k in keys {
					black_box(tree.find(k));
				}
			})
		});

		group.bench_with_input(BenchmarkId::new("btreemap", count), &keys, |b, keys| {
			b.iter(|| {
				for k in keys {
					black_box(map.get(k));
				}
			})
		});
	}

	group.finish();
}

// ============================================================================
// Erase Benchmarks
// ============================================================================

fn bench_erase(c: &mut Criterion) {
	let mut group = c.benchmark_group("erase_random");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		group.throughput(Throughput::Elements(count as u64));

		group.bench_with_input(BenchmarkId::new("rbtree", count), &keys, |b, keys| {
			b.iter_batched(
				|| {
					let mut tree = RbTree::<i64>::with_capacity(keys.len());
					let handles: Vec<_> = keys.iter().map(|&k| tree.insert(k)).collect();
					(tree, handles)
				},
				|(mut tree, handles)| {
					for node in handles {
						black_box(tree.erase(node).ok());
					}
					tree
				},
				criterion::BatchSize::SmallInput,
			)
		});

		group.bench_with_input(BenchmarkId::new("btreemap", count), &keys, |b, keys| {
			b.iter_batched(
				|| {
					let mut map = BTreeMap::new();
					for &k in keys {
						multiset_insert(&mut map, k);
					}
					map
				},
				|mut map| {
					for k in keys {
						multiset_remove(&mut map, k);
					}
					map
				},
				criterion::BatchSize::SmallInput,
			)
		});
	}

	group.finish();
}

// ============================================================================
// Export Benchmarks
// ============================================================================

fn bench_export(c: &mut Criterion) {
	let mut group = c.benchmark_group("export");

	for count in [1_000, 10_000, 100_000] {
		let keys = random_keys(count);
		let tree: RbTree<i64> = keys.iter().copied().collect();
		let mut out = vec![0i64; count];
		group.throughput(Throughput::Elements(count as u64));

		group.bench_function(BenchmarkId::new("rbtree_to_array", count), |b| {
			b.iter(|| black_box(tree.to_array(&mut out)))
		});
	}

	group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_erase, bench_export);
criterion_main!(benches);
