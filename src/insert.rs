//! Insertion and red-black restoration after insert.

use generational_arena::Index;

use crate::node::{Color, Node};
use crate::RbTree;

impl<K: Ord> RbTree<K> {
	/// Places a new red node holding `key` and restores the invariants.
	///
	/// Strictly smaller keys descend left, everything else right, so equal
	/// keys end up in the right subtree.
	pub(crate) fn insert_node(&mut self, key: K) -> Index {
		let mut parent = self.nil;
		let mut cur = self.root;
		let mut goes_left = false;
		while cur != self.nil {
			parent = cur;
			goes_left = key < self.nodes[cur].key;
			cur = if goes_left {
				self.left_of(cur)
			} else {
				self.right_of(cur)
			};
		}

		let z = self.nodes.insert(Node::new(key, parent, self.nil));
		if parent == self.nil {
			self.root = z;
		} else if goes_left {
			self.set_left(parent, z);
		} else {
			self.set_right(parent, z);
		}

		self.insert_fixup(z);
		z
	}
}

impl<K> RbTree<K> {
	/// Repairs a red node `z` that may have a red parent.
	///
	/// The only invariant a fresh red node can break is "no red child of a
	/// red node" (or "root is black" when `z` is the root). Each pass either
	/// pushes the violation two levels up (case 1) or ends it with at most
	/// two rotations (cases 2 and 3).
	fn insert_fixup(&mut self, mut z: Index) {
		while self.color_of(self.parent_of(z)).is_red() {
			// A red parent is never the root, so the grandparent is real.
			let parent = self.parent_of(z);
			let grandparent = self.parent_of(parent);

			if parent == self.left_of(grandparent) {
				let uncle = self.right_of(grandparent);
				if self.color_of(uncle).is_red() {
					log::trace!("insert fixup: red uncle, recolor at {:?}", grandparent);
					self.set_color(parent, Color::Black);
					self.set_color(uncle, Color::Black);
					self.set_color(grandparent, Color::Red);
					z = grandparent;
					continue;
				}

				if z == self.right_of(parent) {
					log::trace!("insert fixup: inner child at {:?}", z);
					z = parent;
					self.rotate_left(z);
				}

				log::trace!("insert fixup: outer child at {:?}", z);
				let parent = self.parent_of(z);
				let grandparent = self.parent_of(parent);
				self.set_color(parent, Color::Black);
				self.set_color(grandparent, Color::Red);
				self.rotate_right(grandparent);
			} else {
				let uncle = self.left_of(grandparent);
				if self.color_of(uncle).is_red() {
					log::trace!("insert fixup: red uncle, recolor at {:?}", grandparent);
					self.set_color(parent, Color::Black);
					self.set_color(uncle, Color::Black);
					self.set_color(grandparent, Color::Red);
					z = grandparent;
					continue;
				}

				if z == self.left_of(parent) {
					log::trace!("insert fixup: inner child at {:?}", z);
					z = parent;
					self.rotate_right(z);
				}

				log::trace!("insert fixup: outer child at {:?}", z);
				let parent = self.parent_of(z);
				let grandparent = self.parent_of(parent);
				self.set_color(parent, Color::Black);
				self.set_color(grandparent, Color::Red);
				self.rotate_left(grandparent);
			}
		}

		// Case 1 may have painted the root red.
		let root = self.root;
		self.set_color(root, Color::Black);
	}
}
