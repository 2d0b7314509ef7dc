//! # rbtree: An Arena-Backed Red-Black Tree
//!
//! This crate provides a red-black tree over an ordered scalar key. It
//! supports ordered insertion, deletion by node handle, lookup, min/max and
//! bulk in-order export, and keeps its height within `2·log₂(n+1)` under any
//! sequence of inserts and erases.
//!
//! ## Design Overview
//!
//! The layout follows the textbook (CLRS) formulation:
//!
//! **Sentinel**: a single, permanently black node stands in for every absent
//! child and for the root's parent. Rotations and fixups therefore never
//! branch on "is there a child here?", they just read the sentinel's color.
//!
//! **Arena storage**: nodes live in a [`generational_arena::Arena`] and link
//! to each other by index. Parent back-pointers are plain indices, so the
//! cyclic parent/child graph involves no ownership at all. The sentinel is an
//! ordinary arena slot whose index the tree remembers.
//!
//! **Generational handles**: [`insert`](RbTree::insert) returns a
//! [`NodeRef`]. Erasing a node retires its handle; a retired handle is
//! rejected with [`Error::InvalidArgument`] rather than aliasing whatever node
//! later reuses the slot.
//!
//! ### Tree Structure
//!
//! ```text
//!                 ┌───────────┐
//!                 │  RbTree   │  root ──┐   nil ──┐
//!                 └───────────┘         │         │
//!                                       ▼         ▼
//!                                 ┌──────────┐  ┌──────────┐
//!                                 │ 20 black │  │ sentinel │ (black)
//!                                 └────┬─────┘  └──────────┘
//!                           ┌──────────┴──────────┐     ▲
//!                           ▼                     ▼     │ every leaf
//!                     ┌──────────┐          ┌──────────┐│ link and the
//!                     │  10 red  │          │  30 red  ││ root's parent
//!                     └──────────┘          └──────────┘│
//!                        left/right ─────────────────────┘
//! ```
//!
//! ## Basic Usage
//!
//! ```
//! use rbtree::{Color, RbTree};
//!
//! let mut tree = RbTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key);
//! }
//!
//! // The third insert rotated 20 up to the root.
//! let root = tree.root().unwrap();
//! assert_eq!(tree.key(root), Ok(20));
//! assert_eq!(tree.color(root), Ok(Color::Black));
//!
//! let mut out = [0; 8];
//! let n = tree.to_array(&mut out);
//! assert_eq!(&out[..n], &[10, 20, 30]);
//!
//! let node = tree.find(&20).unwrap();
//! assert_eq!(tree.erase(node), Ok(20));
//! assert!(tree.erase(node).is_err()); // handle was retired
//! ```
//!
//! ## Duplicates
//!
//! Keys need not be unique. On insertion an equal key descends to the right,
//! so in-order export lists duplicates next to each other. `find` returns the
//! first equal node met on the way down.
//!
//! ## Thread Safety
//!
//! None is provided. Mutation takes `&mut self`, so the borrow checker
//! already rules out concurrent mutation from safe code.

use generational_arena::{Arena, Index};
use smallvec::{smallvec, SmallVec};
use std::sync::atomic::{AtomicU64, Ordering};

pub mod error;

mod erase;
mod insert;
mod iter;
mod node;
mod print;
mod rotate;

#[cfg(any(test, feature = "test-utils"))]
pub mod util;

pub use error::{Error, Result};
pub use node::{Color, NodeRef};

use node::Node;

// ---------------------------------------------------------------------------
// Configuration Constants
// ---------------------------------------------------------------------------

/// Number of node slots reserved by [`RbTree::new`], sentinel included.
const INITIAL_CAPACITY: usize = 16;

/// Inline depth of the explicit stacks used by traversal and teardown.
///
/// A red-black tree of height 32 holds at least 65535 nodes, so walks over
/// smaller trees never touch the heap.
pub(crate) const STACK_DEPTH: usize = 32;

/// Source of per-tree identities stamped into every [`NodeRef`].
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// Core Tree Structure
// ---------------------------------------------------------------------------

/// A red-black tree over keys of type `K`.
///
/// `K` defaults to `i32`. The key type must be `Ord` for placement, `Copy` so
/// keys can be exported into caller buffers, and `Default` so the sentinel
/// can carry a placeholder key that is never compared.
///
/// # Internal Structure
///
/// - `nodes`: the arena owning every node, the sentinel included.
/// - `nil`: index of the sentinel. It is black, its children are itself, and
///   its parent link is scratch space for delete-fixup.
/// - `root`: index of the root node, or `nil` when the tree is empty.
/// - `id`: identity shared by every handle this tree issues.
///
/// Dropping the tree drops the arena, which frees every node and the
/// sentinel without recursion.
pub struct RbTree<K = i32> {
	nodes: Arena<Node<K>>,
	nil: Index,
	root: Index,
	id: u64,
}

impl<K: Ord + Copy + Default> Default for RbTree<K> {
	fn default() -> Self {
		Self::new()
	}
}

// ---------------------------------------------------------------------------
// Link Accessors
// ---------------------------------------------------------------------------

// Internal links always point at live slots, so indexing the arena directly
// cannot panic once the tree invariants hold.
impl<K> RbTree<K> {
	#[inline]
	pub(crate) fn parent_of(&self, i: Index) -> Index {
		self.nodes[i].parent
	}

	#[inline]
	pub(crate) fn left_of(&self, i: Index) -> Index {
		self.nodes[i].left
	}

	#[inline]
	pub(crate) fn right_of(&self, i: Index) -> Index {
		self.nodes[i].right
	}

	#[inline]
	pub(crate) fn color_of(&self, i: Index) -> Color {
		self.nodes[i].color
	}

	#[inline]
	pub(crate) fn set_parent(&mut self, i: Index, parent: Index) {
		self.nodes[i].parent = parent;
	}

	#[inline]
	pub(crate) fn set_left(&mut self, i: Index, left: Index) {
		self.nodes[i].left = left;
	}

	#[inline]
	pub(crate) fn set_right(&mut self, i: Index, right: Index) {
		self.nodes[i].right = right;
	}

	#[inline]
	pub(crate) fn set_color(&mut self, i: Index, color: Color) {
		self.nodes[i].color = color;
	}

	/// Leftmost node of the subtree rooted at `i`.
	pub(crate) fn subtree_min(&self, mut i: Index) -> Index {
		while self.left_of(i) != self.nil {
			i = self.left_of(i);
		}
		i
	}

	/// Rightmost node of the subtree rooted at `i`.
	pub(crate) fn subtree_max(&self, mut i: Index) -> Index {
		while self.right_of(i) != self.nil {
			i = self.right_of(i);
		}
		i
	}

	#[inline]
	fn node_ref(&self, index: Index) -> NodeRef {
		NodeRef {
			tree: self.id,
			index,
		}
	}

	/// Maps an internal index to a public handle, hiding the sentinel.
	#[inline]
	fn handle(&self, i: Index) -> Option<NodeRef> {
		(i != self.nil).then_some(self.node_ref(i))
	}

	/// Validates a caller-supplied handle.
	fn resolve(&self, node: NodeRef) -> Result<Index> {
		if node.tree != self.id || node.index == self.nil || !self.nodes.contains(node.index) {
			log::debug!("rejecting node handle {:?}: not a live node of tree {}", node, self.id);
			return Err(Error::InvalidArgument);
		}
		Ok(node.index)
	}

	// -----------------------------------------------------------------------
	// Tree Metadata
	// -----------------------------------------------------------------------

	/// Returns the number of nodes in the tree.
	pub fn len(&self) -> usize {
		// The sentinel occupies one slot.
		self.nodes.len() - 1
	}

	/// Returns `true` if the tree holds no nodes.
	pub fn is_empty(&self) -> bool {
		self.root == self.nil
	}

	/// Returns the number of node slots the arena can hold without growing.
	pub fn capacity(&self) -> usize {
		self.nodes.capacity()
	}

	/// Returns the number of nodes on the longest root-to-leaf path.
	///
	/// An empty tree has height 0, a single node height 1. For `n` nodes the
	/// result never exceeds `2·log₂(n+1)`.
	pub fn height(&self) -> usize {
		if self.root == self.nil {
			return 0;
		}

		let mut stack: SmallVec<[(Index, usize); STACK_DEPTH]> = smallvec![(self.root, 1)];
		let mut height = 0;
		while let Some((i, depth)) = stack.pop() {
			height = height.max(depth);
			for child in [self.left_of(i), self.right_of(i)] {
				if child != self.nil {
					stack.push((child, depth + 1));
				}
			}
		}
		height
	}

	/// Returns the black-height of the root.
	///
	/// This counts the black nodes on a path from the root (exclusive) down
	/// to the sentinel (inclusive). Since every path agrees, the leftmost one
	/// is used. An empty tree has black-height 0.
	pub fn black_height(&self) -> usize {
		if self.root == self.nil {
			return 0;
		}

		let mut count = 0;
		let mut i = self.left_of(self.root);
		loop {
			if self.color_of(i).is_black() {
				count += 1;
			}
			if i == self.nil {
				return count;
			}
			i = self.left_of(i);
		}
	}

	// -----------------------------------------------------------------------
	// Handle Introspection
	// -----------------------------------------------------------------------

	/// Returns the root node, or `None` if the tree is empty.
	pub fn root(&self) -> Option<NodeRef> {
		self.handle(self.root)
	}

	/// Returns `true` if `node` refers to a live node of this tree.
	pub fn contains_node(&self, node: NodeRef) -> bool {
		self.resolve(node).is_ok()
	}

	/// Returns the color of `node`.
	pub fn color(&self, node: NodeRef) -> Result<Color> {
		self.resolve(node).map(|i| self.color_of(i))
	}

	/// Returns the parent of `node`, or `None` for the root.
	pub fn parent(&self, node: NodeRef) -> Result<Option<NodeRef>> {
		self.resolve(node).map(|i| self.handle(self.parent_of(i)))
	}

	/// Returns the left child of `node`, if any.
	pub fn left(&self, node: NodeRef) -> Result<Option<NodeRef>> {
		self.resolve(node).map(|i| self.handle(self.left_of(i)))
	}

	/// Returns the right child of `node`, if any.
	pub fn right(&self, node: NodeRef) -> Result<Option<NodeRef>> {
		self.resolve(node).map(|i| self.handle(self.right_of(i)))
	}

	/// Returns the successor used by [`erase`](Self::erase): the leftmost
	/// node of `node`'s right subtree.
	///
	/// This only looks downward. A node without a right child has no
	/// successor here, even if an ancestor holds a larger key.
	pub fn successor(&self, node: NodeRef) -> Result<Option<NodeRef>> {
		self.resolve(node).map(|i| self.handle(self.find_successor(i)))
	}
}

// ---------------------------------------------------------------------------
// RbTree Implementation
// ---------------------------------------------------------------------------

impl<K: Ord + Copy + Default> RbTree<K> {
	// -----------------------------------------------------------------------
	// Construction
	// -----------------------------------------------------------------------

	/// Creates a new, empty tree.
	///
	/// The sentinel is allocated immediately, so `new()` does allocate.
	///
	/// # Example
	///
	/// ```
	/// use rbtree::RbTree;
	///
	/// let tree: RbTree = RbTree::new();
	/// assert!(tree.is_empty());
	/// assert_eq!(tree.height(), 0);
	/// ```
	pub fn new() -> Self {
		Self::with_capacity(INITIAL_CAPACITY - 1)
	}

	/// Creates an empty tree with room for `capacity` nodes before the arena
	/// has to grow.
	pub fn with_capacity(capacity: usize) -> Self {
		let mut nodes = Arena::with_capacity(capacity.saturating_add(1));
		// The sentinel's links are patched to point at itself once its index
		// is known.
		let placeholder = Index::from_raw_parts(0, 0);
		let mut sentinel = Node::new(K::default(), placeholder, placeholder);
		sentinel.color = Color::Black;
		let nil = nodes.insert(sentinel);

		let mut tree = RbTree {
			nodes,
			nil,
			root: nil,
			id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
		};
		tree.reset_sentinel();
		tree
	}

	// -----------------------------------------------------------------------
	// Public API: Read Operations
	// -----------------------------------------------------------------------

	/// Returns the first node holding `key` met on the way down from the
	/// root, or `None` if no node holds it.
	///
	/// # Example
	///
	/// ```
	/// use rbtree::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// let node = tree.insert(7);
	///
	/// assert_eq!(tree.find(&7), Some(node));
	/// assert_eq!(tree.find(&8), None);
	/// ```
	pub fn find(&self, key: &K) -> Option<NodeRef> {
		let mut cur = self.root;
		while cur != self.nil {
			let node = &self.nodes[cur];
			if *key == node.key {
				return Some(self.node_ref(cur));
			}
			cur = if *key < node.key {
				node.left
			} else {
				node.right
			};
		}
		None
	}

	/// Returns `true` if some node holds `key`.
	pub fn contains(&self, key: &K) -> bool {
		self.find(key).is_some()
	}

	/// Returns the key stored in `node`.
	pub fn key(&self, node: NodeRef) -> Result<K> {
		self.resolve(node).map(|i| self.nodes[i].key)
	}

	/// Returns the node with the smallest key.
	///
	/// Fails with [`Error::EmptyTree`] if the tree is empty.
	pub fn min(&self) -> Result<NodeRef> {
		if self.is_empty() {
			return Err(Error::EmptyTree);
		}
		Ok(self.node_ref(self.subtree_min(self.root)))
	}

	/// Returns the node with the largest key.
	///
	/// Fails with [`Error::EmptyTree`] if the tree is empty.
	pub fn max(&self) -> Result<NodeRef> {
		if self.is_empty() {
			return Err(Error::EmptyTree);
		}
		Ok(self.node_ref(self.subtree_max(self.root)))
	}

	/// Writes keys in order into `out`, stopping when `out` is full.
	///
	/// Returns the number of keys written, which is
	/// `min(out.len(), self.len())`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree::RbTree;
	///
	/// let tree: RbTree = [3, 1, 2, 1].into_iter().collect();
	///
	/// let mut out = [0; 3];
	/// assert_eq!(tree.to_array(&mut out), 3);
	/// assert_eq!(out, [1, 1, 2]);
	/// ```
	pub fn to_array(&self, out: &mut [K]) -> usize {
		let mut written = 0;
		// The buffer drives the zip so the walk never advances past capacity.
		for (slot, i) in out.iter_mut().zip(self.in_order()) {
			*slot = self.nodes[i].key;
			written += 1;
		}
		written
	}

	/// Returns every key in order.
	pub fn to_vec(&self) -> Vec<K> {
		let mut out = Vec::with_capacity(self.len());
		out.extend(self.in_order().map(|i| self.nodes[i].key));
		out
	}

	// -----------------------------------------------------------------------
	// Public API: Write Operations
	// -----------------------------------------------------------------------

	/// Inserts `key` and returns a handle to the new node.
	///
	/// Equal keys are allowed; a new duplicate is placed to the right of the
	/// existing ones. The handle stays valid until the node is erased or the
	/// tree is cleared.
	///
	/// # Example
	///
	/// ```
	/// use rbtree::RbTree;
	///
	/// let mut tree = RbTree::new();
	/// let a = tree.insert(5);
	/// let b = tree.insert(5);
	///
	/// assert_ne!(a, b);
	/// assert_eq!(tree.len(), 2);
	/// ```
	pub fn insert(&mut self, key: K) -> NodeRef {
		let i = self.insert_node(key);
		self.node_ref(i)
	}

	/// Erases `node` from the tree and returns its key.
	///
	/// The handle is retired on success. Handles to every other node,
	/// including the in-order successor that may move into the erased
	/// node's position, stay valid.
	///
	/// Fails with [`Error::InvalidArgument`] if the handle is stale.
	///
	/// # Example
	///
	/// ```
	/// use rbtree::{Error, RbTree};
	///
	/// let mut tree = RbTree::new();
	/// let node = tree.insert(1);
	///
	/// assert_eq!(tree.erase(node), Ok(1));
	/// assert_eq!(tree.erase(node), Err(Error::InvalidArgument));
	/// ```
	pub fn erase(&mut self, node: NodeRef) -> Result<K> {
		let z = self.resolve(node)?;
		Ok(self.erase_node(z))
	}

	/// Erases the node [`find`](Self::find) would return for `key`.
	///
	/// Fails with [`Error::NotFound`] if no node holds `key`.
	pub fn remove(&mut self, key: &K) -> Result<K> {
		let node = self.find(key).ok_or(Error::NotFound)?;
		self.erase(node)
	}

	/// Removes every node, retiring all outstanding handles.
	///
	/// The sentinel and the arena's allocation are kept. The walk uses an
	/// explicit stack, so tree height does not bound the call depth.
	pub fn clear(&mut self) {
		if self.root != self.nil {
			let mut stack: SmallVec<[Index; STACK_DEPTH]> = smallvec![self.root];
			while let Some(i) = stack.pop() {
				if let Some(node) = self.nodes.remove(i) {
					for child in [node.left, node.right] {
						if child != self.nil {
							stack.push(child);
						}
					}
				}
			}
		}
		self.root = self.nil;
		self.reset_sentinel();
		debug_assert_eq!(self.len(), 0);
	}

	/// Points every sentinel link back at the sentinel itself.
	fn reset_sentinel(&mut self) {
		let nil = self.nil;
		let sentinel = &mut self.nodes[nil];
		sentinel.parent = nil;
		sentinel.left = nil;
		sentinel.right = nil;
	}
}

impl<K: Ord + Copy + Default> Extend<K> for RbTree<K> {
	fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
		for key in iter {
			self.insert(key);
		}
	}
}

impl<K: Ord + Copy + Default> FromIterator<K> for RbTree<K> {
	fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
		let mut tree = Self::new();
		tree.extend(iter);
		tree
	}
}

// ===========================================================================
// Test-Only Validation Module
// ===========================================================================

/// Invariant validation for testing.
#[cfg(any(test, feature = "test-utils"))]
impl<K: Ord + std::fmt::Debug> RbTree<K> {
	/// Validates all tree invariants and returns the root's black-height.
	/// Panics with diagnostic info if any invariant is violated.
	///
	/// # Invariants Checked
	///
	/// 1. Every node is red or black (enforced by [`Color`])
	/// 2. The root is black and its parent is the sentinel
	/// 3. The sentinel is black and its children are itself
	/// 4. A red node has no red child
	/// 5. Every path from a node to the sentinel has the same black count
	/// 6. Key ordering: left subtree <= node <= right subtree
	/// 7. Link consistency: each child's parent link points back
	/// 8. Reachable node count matches arena occupancy
	pub fn assert_invariants(&self) -> usize {
		let sentinel = &self.nodes[self.nil];

		// Invariant 3
		assert!(sentinel.color.is_black(), "Sentinel is not black");
		assert_eq!(sentinel.left, self.nil, "Sentinel left link was overwritten");
		assert_eq!(sentinel.right, self.nil, "Sentinel right link was overwritten");

		if self.root == self.nil {
			assert_eq!(self.len(), 0, "Empty tree still holds {} nodes", self.len());
			return 0;
		}

		// Invariant 2
		let root = &self.nodes[self.root];
		assert!(root.color.is_black(), "Root {:?} is red", root.key);
		assert_eq!(root.parent, self.nil, "Root {:?} has a parent", root.key);

		let mut count = 0;
		let black_height = self.validate_node_recursive(self.root, None, None, &mut count);

		// Invariant 8
		assert_eq!(
			count,
			self.len(),
			"Reached {} nodes but the arena holds {}",
			count,
			self.len()
		);

		// The root itself is black and excluded from its own black-height.
		black_height - 1
	}

	/// Recursively validates a subtree and returns the number of black nodes
	/// from `i` (inclusive) down to the sentinel (inclusive).
	///
	/// # Arguments
	/// * `i` - Root of the subtree to validate
	/// * `lower` - Inclusive lower bound from ancestors, None if unbounded
	/// * `upper` - Inclusive upper bound from ancestors, None if unbounded
	/// * `count` - Running count of visited nodes
	fn validate_node_recursive(
		&self,
		i: Index,
		lower: Option<&K>,
		upper: Option<&K>,
		count: &mut usize,
	) -> usize {
		if i == self.nil {
			return 1;
		}

		*count += 1;
		assert!(*count <= self.len(), "Visited more nodes than exist: the links form a cycle");

		let node = &self.nodes[i];

		// Invariant 6
		if let Some(lower) = lower {
			assert!(&node.key >= lower, "Key {:?} is below ancestor bound {:?}", node.key, lower);
		}
		if let Some(upper) = upper {
			assert!(&node.key <= upper, "Key {:?} is above ancestor bound {:?}", node.key, upper);
		}

		// Invariant 7
		for child in [node.left, node.right] {
			if child != self.nil {
				assert_eq!(
					self.nodes[child].parent, i,
					"Child {:?} of {:?} does not point back to its parent",
					self.nodes[child].key, node.key
				);
			}
		}

		// Invariant 4
		if node.color.is_red() {
			assert!(
				self.color_of(node.left).is_black() && self.color_of(node.right).is_black(),
				"Red node {:?} has a red child",
				node.key
			);
		}

		let left = self.validate_node_recursive(node.left, lower, Some(&node.key), count);
		let right = self.validate_node_recursive(node.right, Some(&node.key), upper, count);

		// Invariant 5
		assert_eq!(
			left, right,
			"Black-height mismatch under {:?}: left {} != right {}",
			node.key, left, right
		);

		left + usize::from(node.color.is_black())
	}
}
