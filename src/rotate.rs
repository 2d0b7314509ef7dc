//! Rotation primitives shared by insert-fixup and delete-fixup.
//!
//! Rotations restructure three links and their parent back-pointers. They
//! compare no keys and touch no colors; recoloring is up to the caller.

use generational_arena::Index;

use crate::RbTree;

impl<K> RbTree<K> {
	/// Rotates the subtree rooted at `x` to the left.
	///
	/// ```text
	///     x                y
	///    / \              / \
	///   a   y     =>     x   c
	///      / \          / \
	///     b   c        a   b
	/// ```
	///
	/// `x` must have a real right child.
	pub(crate) fn rotate_left(&mut self, x: Index) {
		let y = self.right_of(x);
		debug_assert_ne!(y, self.nil, "rotate_left needs a right child");
		log::trace!("rotate left at {:?}", x);

		let inner = self.left_of(y);
		self.set_right(x, inner);
		if inner != self.nil {
			self.set_parent(inner, x);
		}

		// y takes x's slot under x's old parent, or becomes the root.
		self.transplant(x, y);
		self.set_left(y, x);
		self.set_parent(x, y);
	}

	/// Rotates the subtree rooted at `x` to the right.
	///
	/// ```text
	///       x            y
	///      / \          / \
	///     y   c   =>   a   x
	///    / \              / \
	///   a   b            b   c
	/// ```
	///
	/// `x` must have a real left child.
	pub(crate) fn rotate_right(&mut self, x: Index) {
		let y = self.left_of(x);
		debug_assert_ne!(y, self.nil, "rotate_right needs a left child");
		log::trace!("rotate right at {:?}", x);

		let inner = self.right_of(y);
		self.set_left(x, inner);
		if inner != self.nil {
			self.set_parent(inner, x);
		}

		self.transplant(x, y);
		self.set_right(y, x);
		self.set_parent(x, y);
	}
}
