//! # Property-Based Tests for the Red-Black Tree
//!
//! Randomized inputs generated by proptest, checked against a sorted `Vec`
//! used as a multiset oracle.
//!
//! ## Test Properties
//!
//! - Insert-then-export: export equals the sorted input, duplicates included
//! - Invariants hold after every single insert and erase
//! - Erase shrinks the tree by one and removes exactly one copy of the key
//! - Erasing a retired handle fails
//! - Partial export writes `min(capacity, len)` sorted keys
//! - Height stays within `2·log₂(n+1)`

use proptest::prelude::*;
use rbtree::{Error, RbTree};

// ===========================================================================
// Strategy Helpers
// ===========================================================================

/// Keys from a narrow range so duplicates are common.
fn keys(max_len: usize) -> impl Strategy<Value = Vec<i32>> {
	prop::collection::vec(-64i32..64, 0..max_len)
}

/// Operations that can be performed on the tree
#[derive(Debug, Clone)]
enum Op {
	Insert(i32),
	/// Erase the live node at this position (modulo the live count).
	Erase(usize),
	Find(i32),
}

/// Generate a sequence of random operations
fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
	prop::collection::vec(
		prop_oneof![
			3 => (-32i32..32).prop_map(Op::Insert),
			2 => any::<usize>().prop_map(Op::Erase),
			1 => (-32i32..32).prop_map(Op::Find),
		],
		0..max_ops,
	)
}

// ===========================================================================
// Insert Properties
// ===========================================================================

proptest! {
	/// Property: export after inserts is the sorted input
	#[test]
	fn insert_then_export_is_sorted(input in keys(300)) {
		let tree: RbTree = input.iter().copied().collect();
		tree.assert_invariants();

		let mut expected = input.clone();
		expected.sort_unstable();
		prop_assert_eq!(tree.to_vec(), expected);
		prop_assert_eq!(tree.len(), input.len());
	}

	/// Property: invariants hold after every insert
	#[test]
	fn invariants_after_each_insert(input in keys(120)) {
		let mut tree = RbTree::new();
		for key in input {
			let node = tree.insert(key);
			tree.assert_invariants();
			prop_assert_eq!(tree.key(node), Ok(key));
			prop_assert!(tree.contains(&key));
		}
	}

	/// Property: height never exceeds 2·log₂(n+1)
	#[test]
	fn height_bound(input in prop::collection::vec(any::<i32>(), 1..500)) {
		let tree: RbTree = input.into_iter().collect();
		let bound = 2.0 * ((tree.len() + 1) as f64).log2();
		prop_assert!(tree.height() as f64 <= bound);
	}

	/// Property: min and max agree with the input extremes
	#[test]
	fn min_max_match_input(input in prop::collection::vec(any::<i32>(), 1..200)) {
		let tree: RbTree = input.iter().copied().collect();
		prop_assert_eq!(tree.key(tree.min().unwrap()), Ok(*input.iter().min().unwrap()));
		prop_assert_eq!(tree.key(tree.max().unwrap()), Ok(*input.iter().max().unwrap()));
	}
}

// ===========================================================================
// Erase Properties
// ===========================================================================

proptest! {
	/// Property: erasing any present node keeps invariants and drops one copy
	#[test]
	fn erase_arbitrary_node(input in keys(200), pick in any::<usize>()) {
		prop_assume!(!input.is_empty());

		let mut tree = RbTree::new();
		let handles: Vec<_> = input.iter().map(|&k| tree.insert(k)).collect();
		let victim = pick % handles.len();
		let key = input[victim];

		prop_assert_eq!(tree.erase(handles[victim]), Ok(key));
		tree.assert_invariants();

		let mut expected = input.clone();
		expected.remove(victim);
		expected.sort_unstable();
		prop_assert_eq!(tree.to_vec(), expected.clone());
		prop_assert_eq!(tree.contains(&key), expected.contains(&key));

		// A second erase through the same handle is rejected.
		prop_assert_eq!(tree.erase(handles[victim]), Err(Error::InvalidArgument));
		prop_assert_eq!(tree.len(), input.len() - 1);
	}

	/// Property: random operation sequences match a sorted-Vec oracle
	#[test]
	fn operations_match_oracle(ops in operations(300)) {
		let mut tree = RbTree::new();
		let mut live = Vec::new();
		let mut oracle: Vec<i32> = Vec::new();

		for op in ops {
			match op {
				Op::Insert(k) => {
					live.push((tree.insert(k), k));
					let pos = oracle.partition_point(|&x| x <= k);
					oracle.insert(pos, k);
				}
				Op::Erase(i) => {
					if live.is_empty() {
						continue;
					}
					let (node, k) = live.swap_remove(i % live.len());
					prop_assert_eq!(tree.erase(node), Ok(k));
					let pos = oracle.binary_search(&k).expect("oracle holds live key");
					oracle.remove(pos);
				}
				Op::Find(k) => {
					let found = tree.find(&k);
					prop_assert_eq!(found.is_some(), oracle.binary_search(&k).is_ok());
					if let Some(node) = found {
						prop_assert_eq!(tree.key(node), Ok(k));
					}
				}
			}
			tree.assert_invariants();
		}

		prop_assert_eq!(tree.to_vec(), oracle);
	}
}

// ===========================================================================
// Export Properties
// ===========================================================================

proptest! {
	/// Property: a short buffer receives the smallest keys in order
	#[test]
	fn partial_export(input in keys(200), capacity in 0usize..250) {
		let tree: RbTree = input.iter().copied().collect();

		let mut out = vec![i32::MIN; capacity];
		let written = tree.to_array(&mut out);
		prop_assert_eq!(written, capacity.min(input.len()));

		let mut expected = input.clone();
		expected.sort_unstable();
		prop_assert_eq!(&out[..written], &expected[..written]);
		prop_assert!(out[written..].iter().all(|&x| x == i32::MIN));
	}
}
