//! Deletion and red-black restoration after erase.
//!
//! ## Algorithm
//!
//! ```text
//! erase(z)
//!    │
//!    ├── z has < 2 children ──► splice z out, its child x fills the slot
//!    │
//!    └── z has 2 children ────► y = successor(z), splice y out (its right
//!                               child x fills y's slot), then move y into
//!                               z's position with z's color
//!    │
//!    ▼
//! removed color was black? ──► delete_fixup(x)   (x may be the sentinel)
//!    │
//!    ▼
//! free z
//! ```
//!
//! Nothing on this path allocates or fails, so the tree is never left half
//! repaired.

use generational_arena::Index;

use crate::node::Color;
use crate::RbTree;

impl<K> RbTree<K> {
	/// Replaces `u` with `v` in `u`'s parent (or as the root).
	///
	/// `v`'s parent link is written unconditionally, even when `v` is the
	/// sentinel; delete-fixup relies on that scratch value. `u`'s own links
	/// are left alone.
	pub(crate) fn transplant(&mut self, u: Index, v: Index) {
		let parent = self.parent_of(u);
		if parent == self.nil {
			self.root = v;
		} else if u == self.left_of(parent) {
			self.set_left(parent, v);
		} else {
			self.set_right(parent, v);
		}
		self.set_parent(v, parent);
	}

	/// Returns the leftmost node of `z`'s right subtree, or the sentinel when
	/// `z` has no right child.
	pub(crate) fn find_successor(&self, z: Index) -> Index {
		let right = self.right_of(z);
		if right == self.nil {
			return self.nil;
		}
		self.subtree_min(right)
	}

	/// Restores the black-height after a black node was spliced out above
	/// `x`.
	///
	/// `x` carries an extra black. Each pass either moves that extra black
	/// one level up (case 2) or absorbs it with at most three rotations
	/// (cases 1, 3, 4). A red `x` ("red-and-black") absorbs it by turning
	/// black after the loop.
	fn delete_fixup(&mut self, mut x: Index) {
		while x != self.root && self.color_of(x).is_black() {
			let parent = self.parent_of(x);

			if x == self.left_of(parent) {
				let mut sibling = self.right_of(parent);

				if self.color_of(sibling).is_red() {
					log::trace!("delete fixup: red sibling {:?}", sibling);
					self.set_color(sibling, Color::Black);
					self.set_color(parent, Color::Red);
					self.rotate_left(parent);
					sibling = self.right_of(self.parent_of(x));
				}

				let near = self.left_of(sibling);
				let far = self.right_of(sibling);
				if self.color_of(near).is_black() && self.color_of(far).is_black() {
					log::trace!("delete fixup: black nephews, move up from {:?}", x);
					self.set_color(sibling, Color::Red);
					x = self.parent_of(x);
					continue;
				}

				if self.color_of(far).is_black() {
					log::trace!("delete fixup: red near nephew {:?}", near);
					self.set_color(near, Color::Black);
					self.set_color(sibling, Color::Red);
					self.rotate_right(sibling);
					sibling = self.right_of(self.parent_of(x));
				}

				log::trace!("delete fixup: red far nephew under {:?}", sibling);
				let parent = self.parent_of(x);
				self.set_color(sibling, self.color_of(parent));
				self.set_color(parent, Color::Black);
				let far = self.right_of(sibling);
				self.set_color(far, Color::Black);
				self.rotate_left(parent);
				x = self.root;
			} else {
				let mut sibling = self.left_of(parent);

				if self.color_of(sibling).is_red() {
					log::trace!("delete fixup: red sibling {:?}", sibling);
					self.set_color(sibling, Color::Black);
					self.set_color(parent, Color::Red);
					self.rotate_right(parent);
					sibling = self.left_of(self.parent_of(x));
				}

				let near = self.right_of(sibling);
				let far = self.left_of(sibling);
				if self.color_of(near).is_black() && self.color_of(far).is_black() {
					log::trace!("delete fixup: black nephews, move up from {:?}", x);
					self.set_color(sibling, Color::Red);
					x = self.parent_of(x);
					continue;
				}

				if self.color_of(far).is_black() {
					log::trace!("delete fixup: red near nephew {:?}", near);
					self.set_color(near, Color::Black);
					self.set_color(sibling, Color::Red);
					self.rotate_left(sibling);
					sibling = self.left_of(self.parent_of(x));
				}

				log::trace!("delete fixup: red far nephew under {:?}", sibling);
				let parent = self.parent_of(x);
				self.set_color(sibling, self.color_of(parent));
				self.set_color(parent, Color::Black);
				let far = self.left_of(sibling);
				self.set_color(far, Color::Black);
				self.rotate_right(parent);
				x = self.root;
			}
		}

		// Writing black to the sentinel is a no-op: it is always black.
		self.set_color(x, Color::Black);
	}
}

impl<K: Copy> RbTree<K> {
	/// Unlinks the live node `z`, repairs the tree and frees `z`'s slot.
	pub(crate) fn erase_node(&mut self, z: Index) -> K {
		let key = self.nodes[z].key;

		let mut removed_color = self.color_of(z);
		let x;
		if self.left_of(z) == self.nil {
			x = self.right_of(z);
			self.transplant(z, x);
		} else if self.right_of(z) == self.nil {
			x = self.left_of(z);
			self.transplant(z, x);
		} else {
			let y = self.find_successor(z);
			removed_color = self.color_of(y);
			x = self.right_of(y);

			if self.parent_of(y) == z {
				// x may be the sentinel; fixup needs to find y above it.
				self.set_parent(x, y);
			} else {
				self.transplant(y, x);
				let right = self.right_of(z);
				self.set_right(y, right);
				self.set_parent(right, y);
			}

			self.transplant(z, y);
			let left = self.left_of(z);
			self.set_left(y, left);
			self.set_parent(left, y);
			self.set_color(y, self.color_of(z));
		}

		if removed_color.is_black() {
			self.delete_fixup(x);
		}

		// Drop the scratch parent link transplant may have left on the sentinel.
		let nil = self.nil;
		self.set_parent(nil, nil);

		self.nodes.remove(z);
		key
	}
}
