//! Debug rendering of the tree shape.
//!
//! ```text
//! RbTree(len = 3)
//! └─ 20 black
//!    ├─ 10 red
//!    └─ 30 red
//! ```
//!
//! A node with exactly one child prints the missing side as `∅` so left and
//! right stay distinguishable.

use std::fmt;

use generational_arena::Index;

use crate::node::Color;
use crate::RbTree;

impl<K: fmt::Debug> fmt::Debug for RbTree<K> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RbTree(len = {})", self.len())?;
		if self.root != self.nil {
			self.fmt_node(f, self.root, "", true)?;
		}
		Ok(())
	}
}

impl<K: fmt::Debug> RbTree<K> {
	fn fmt_node(&self, f: &mut fmt::Formatter<'_>, i: Index, tab: &str, last: bool) -> fmt::Result {
		let node = &self.nodes[i];
		let color = match node.color {
			Color::Red => "red",
			Color::Black => "black",
		};
		let branch = if last { "└─" } else { "├─" };
		write!(f, "\n{tab}{branch} {:?} {color}", node.key)?;

		if node.left == self.nil && node.right == self.nil {
			return Ok(());
		}

		let child_tab = format!("{tab}{}", if last { "   " } else { "│  " });
		for (child, is_last) in [(node.left, false), (node.right, true)] {
			if child == self.nil {
				let branch = if is_last { "└─" } else { "├─" };
				write!(f, "\n{child_tab}{branch} ∅")?;
			} else {
				self.fmt_node(f, child, &child_tab, is_last)?;
			}
		}
		Ok(())
	}
}
