//! Test utilities for building exact tree shapes from JSON fixtures.
//!
//! Fixtures describe a tree node by node, colors included:
//!
//! ```json
//! {"key": 10, "color": "black",
//!  "left":  {"key": 5,  "color": "black"},
//!  "right": {"key": 20, "color": "red"}}
//! ```
//!
//! `null` describes the empty tree. The shape is taken as given; no fixup
//! runs, so call `assert_invariants` on the result to reject a malformed
//! fixture.

use generational_arena::Index;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::node::{Color, Node};
use crate::RbTree;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum FixtureColor {
	Red,
	Black,
}

impl From<FixtureColor> for Color {
	fn from(color: FixtureColor) -> Self {
		match color {
			FixtureColor::Red => Color::Red,
			FixtureColor::Black => Color::Black,
		}
	}
}

#[derive(Deserialize, Debug)]
struct FixtureNode<K> {
	key: K,
	color: FixtureColor,
	left: Option<Box<FixtureNode<K>>>,
	right: Option<Box<FixtureNode<K>>>,
}

impl<K: Ord + Copy + Default + DeserializeOwned> RbTree<K> {
	/// Builds a tree with exactly the shape and colors described by `json`.
	pub fn from_fixture(json: &str) -> serde_json::Result<Self> {
		let root: Option<FixtureNode<K>> = serde_json::from_str(json)?;
		Ok(Self::from_fixture_root(root))
	}

	/// Loads a fixture file, panicking if it is missing or malformed.
	pub fn sample_tree<P: AsRef<std::path::Path>>(path: P) -> Self {
		let file = std::fs::File::open(path).expect("failed to find file");
		let root: Option<FixtureNode<K>> = serde_json::from_reader(file).unwrap();
		Self::from_fixture_root(root)
	}

	fn from_fixture_root(root: Option<FixtureNode<K>>) -> Self {
		let mut tree = Self::new();
		if let Some(root) = root {
			let nil = tree.nil;
			tree.root = tree.translate_node(root, nil);
		}
		tree
	}

	fn translate_node(&mut self, fixture: FixtureNode<K>, parent: Index) -> Index {
		let mut node = Node::new(fixture.key, parent, self.nil);
		node.color = fixture.color.into();
		let i = self.nodes.insert(node);

		if let Some(left) = fixture.left {
			let left = self.translate_node(*left, i);
			self.set_left(i, left);
		}
		if let Some(right) = fixture.right {
			let right = self.translate_node(*right, i);
			self.set_right(i, right);
		}
		i
	}
}
