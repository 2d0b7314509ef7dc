//! Node storage and the public node handle.

use generational_arena::Index;

/// The color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
	Red,
	Black,
}

impl Color {
	#[inline]
	pub fn is_red(self) -> bool {
		self == Color::Red
	}

	#[inline]
	pub fn is_black(self) -> bool {
		self == Color::Black
	}
}

/// A handle to a node owned by an [`RbTree`](crate::RbTree).
///
/// Handles are generational: once the node is erased (or the tree cleared),
/// the handle is retired and every operation that receives it fails with
/// [`Error::InvalidArgument`](crate::error::Error::InvalidArgument), even if
/// the underlying slot has since been reused by a newer node.
///
/// A handle also records which tree issued it, so a handle passed to any
/// other tree is rejected the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
	pub(crate) tree: u64,
	pub(crate) index: Index,
}

/// A tree node as stored in the arena.
///
/// All three links are arena indices. "No node" is the tree's sentinel index,
/// never an `Option`, so rotations and fixups never branch on absence.
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
	pub(crate) color: Color,
	pub(crate) key: K,
	pub(crate) parent: Index,
	pub(crate) left: Index,
	pub(crate) right: Index,
}

impl<K> Node<K> {
	/// A fresh red node whose children are the sentinel.
	#[inline]
	pub(crate) fn new(key: K, parent: Index, nil: Index) -> Self {
		Node {
			color: Color::Red,
			key,
			parent,
			left: nil,
			right: nil,
		}
	}
}
