//! # Error Types for the Red-Black Tree
//!
//! Every algorithm inside the tree (rotations, both fixups, transplant) works
//! on indices that are already known to be live, so none of them can fail.
//! Errors only arise at the public boundary, where a caller hands in a node
//! handle or asks for an extremum of an empty tree.
//!
//! ## Error Taxonomy
//!
//! ```text
//! caller input
//!      │
//!      ├── stale / foreign / sentinel handle ──► Err(InvalidArgument)
//!      │
//!      ├── key-addressed removal, key absent ──► Err(NotFound)
//!      │
//!      ├── min() / max() on an empty tree ─────► Err(EmptyTree)
//!      │
//!      ▼
//! operation runs to completion
//! ```
//!
//! Plain lookups (`find`, `successor`) report absence as `None` instead of an
//! error, since "no such node" is an ordinary answer there.

use thiserror::Error;

/// Errors returned by [`RbTree`](crate::RbTree) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// The node handle does not refer to a live node of this tree.
	///
	/// This happens when:
	/// - The node was already erased (handles are retired on erase)
	/// - The tree was cleared after the handle was issued
	/// - The handle is the tree's sentinel
	/// - The handle was issued by a different tree
	#[error("node handle is stale or does not refer to a live node")]
	InvalidArgument,

	/// No node holds the requested key.
	#[error("no node holds the requested key")]
	NotFound,

	/// The operation needs at least one node but the tree is empty.
	#[error("tree is empty")]
	EmptyTree,
}

/// A Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
