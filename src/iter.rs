//! In-order traversal over the arena.
//!
//! The walk is crate-internal: the public surface exposes bulk export
//! ([`RbTree::to_array`], [`RbTree::to_vec`]) rather than a cursor.

use generational_arena::Index;
use smallvec::SmallVec;

use crate::{RbTree, STACK_DEPTH};

/// Yields node indices in key order using an explicit stack.
///
/// The stack holds the chain of ancestors whose left subtree is still being
/// visited, so its depth never exceeds the tree height.
pub(crate) struct InOrder<'t, K> {
	tree: &'t RbTree<K>,
	stack: SmallVec<[Index; STACK_DEPTH]>,
	cursor: Index,
}

impl<'t, K> InOrder<'t, K> {
	pub(crate) fn new(tree: &'t RbTree<K>) -> Self {
		InOrder {
			tree,
			stack: SmallVec::new(),
			cursor: tree.root,
		}
	}
}

impl<K> Iterator for InOrder<'_, K> {
	type Item = Index;

	fn next(&mut self) -> Option<Index> {
		while self.cursor != self.tree.nil {
			self.stack.push(self.cursor);
			self.cursor = self.tree.left_of(self.cursor);
		}

		let top = self.stack.pop()?;
		self.cursor = self.tree.right_of(top);
		Some(top)
	}
}

impl<K> RbTree<K> {
	#[inline]
	pub(crate) fn in_order(&self) -> InOrder<'_, K> {
		InOrder::new(self)
	}
}
