use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};

use tracing::debug;

use crate::error::{Result, SplayError};
use crate::node::{Link, SplayNode};
use crate::splay::{splay, splay_max, splay_min};

/// Key-only shape of the tree.
pub type SplaySet<K> = SplayTree<K, ()>;

/// A top-down splay tree holding unique keys, each with a value payload.
///
/// Every lookup restructures the tree, so even read-style operations take `&mut self`.
/// Callers that need to share a tree across threads have to wrap it in their own lock.
#[derive(Debug)]
pub struct SplayTree<K, V = ()> {
	pub(crate) root: Link<K, V>,
	pub(crate) size: usize,
}

impl<K, V> Default for SplayTree<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> SplayTree<K, V> {
	#[must_use]
	pub const fn new() -> Self {
		Self { root: None, size: 0 }
	}

	#[must_use]
	pub const fn size(&self) -> usize {
		self.size
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Read-only handle on the root for external traversal.
	#[must_use]
	pub fn root(&self) -> Option<&SplayNode<K, V>> {
		self.root.as_deref()
	}

	/// Smallest key, splayed to the root. `None` on an empty tree.
	pub fn min_key(&mut self) -> Option<&K> {
		let root = self.root.take()?;
		self.root = Some(splay_min(root));
		self.root.as_deref().map(SplayNode::key)
	}

	/// Largest key, splayed to the root. `None` on an empty tree.
	pub fn max_key(&mut self) -> Option<&K> {
		let root = self.root.take()?;
		self.root = Some(splay_max(root));
		self.root.as_deref().map(SplayNode::key)
	}
}

impl<K: Ord, V> SplayTree<K, V> {
	/// Inserts `key` with `value`.
	///
	/// Returns `Ok(false)` without touching the stored value when the key is already present.
	/// The tree is splayed either way.
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn insert(&mut self, key: impl Into<Option<K>>, value: V) -> Result<bool> {
		let key = key.into().ok_or(SplayError::InvalidArgument("null key"))?;
		Ok(self.insert_entry(key, value))
	}

	/// Removes `key`. A miss still splays the tree around the nearest key.
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn delete<Q>(&mut self, key: Option<&Q>) -> Result<bool>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let key = key.ok_or(SplayError::InvalidArgument("null key"))?;
		Ok(self.remove_entry(key).is_some())
	}

	/// Looks `key` up, leaving the node it lands on at the root. An empty tree is not splayed.
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn find<Q>(&mut self, key: Option<&Q>) -> Result<Option<&SplayNode<K, V>>>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let key = key.ok_or(SplayError::InvalidArgument("null key"))?;
		Ok(self.lookup(key))
	}

	/// Like [`find`](Self::find) but an absent key is simply not contained.
	pub fn contains<Q>(&mut self, key: Option<&Q>) -> bool
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		match key {
			Some(key) => self.lookup(key).is_some(),
			None => false,
		}
	}

	pub(crate) fn insert_entry(&mut self, key: K, value: V) -> bool {
		let mut node = Box::new(SplayNode::new(key, value));
		let Some(root) = self.root.take() else {
			self.root = Some(node);
			self.size += 1;
			return true;
		};

		let (mut root, ordering) = splay(root, &node.key);
		match ordering {
			Ordering::Equal => {
				self.root = Some(root);
				return false;
			}
			Ordering::Less => {
				node.left = root.left.take();
				node.right = Some(root);
			}
			Ordering::Greater => {
				node.right = root.right.take();
				node.left = Some(root);
			}
		}
		self.root = Some(node);
		self.size += 1;
		debug!(size = self.size, "Inserted key");
		true
	}

	pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let root = self.root.take()?;
		let (mut root, ordering) = splay(root, key);
		if ordering != Ordering::Equal {
			self.root = Some(root);
			return None;
		}

		self.root = match root.left.take() {
			None => root.right.take(),
			Some(left) => {
				// Every key on the left is smaller, so this splay lifts the predecessor, which has
				// no right child to collide with the saved subtree.
				let (mut predecessor, _) = splay(left, key);
				predecessor.right = root.right.take();
				Some(predecessor)
			}
		};
		self.size -= 1;
		debug!(size = self.size, "Deleted key");
		Some(root.into_entry())
	}

	pub(crate) fn lookup<Q>(&mut self, key: &Q) -> Option<&SplayNode<K, V>>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		match self.splay_root(key)? {
			Ordering::Equal => self.root.as_deref(),
			_ => None,
		}
	}

	pub(crate) fn lookup_mut<Q>(&mut self, key: &Q) -> Option<&mut SplayNode<K, V>>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		match self.splay_root(key)? {
			Ordering::Equal => self.root.as_deref_mut(),
			_ => None,
		}
	}

	fn splay_root<Q>(&mut self, key: &Q) -> Option<Ordering>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let root = self.root.take()?;
		let (root, ordering) = splay(root, key);
		self.root = Some(root);
		Some(ordering)
	}
}

impl<K: Ord> SplayTree<K, ()> {
	/// Key-only insert.
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn insert_key(&mut self, key: impl Into<Option<K>>) -> Result<bool> {
		self.insert(key, ())
	}
}

impl<K: Ord> FromIterator<K> for SplayTree<K, ()> {
	fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
		let mut tree = Self::new();
		for key in iter {
			tree.insert_entry(key, ());
		}
		tree
	}
}

impl<K, V> Drop for SplayTree<K, V> {
	fn drop(&mut self) {
		// Rotate left children up until every node has none, then walk the right spine.
		// Recursive Box drops would overflow on the degenerate shapes splaying allows.
		let mut current = self.root.take();
		while let Some(mut node) = current {
			current = match node.left.take() {
				Some(mut left) => {
					node.left = left.right.take();
					left.right = Some(node);
					Some(left)
				}
				None => node.right.take(),
			};
		}
	}
}

impl<K: Debug, V> Display for SplayTree<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.root() {
			Some(root) => {
				writeln!(f, "SplayTree (size: {}):", self.size)?;
				format_tree(root, f, &|node| format!("{:?}", node.key))
			}
			None => writeln!(f, "SplayTree: <empty>"),
		}
	}
}

/// Indentation guides drawn per line. Deeper levels collapse into a `[+n]` marker so a
/// degenerate spine renders in linear space.
const MAX_GUIDES: usize = 32;

/// Pre-order rendering with `├──`/`└──` branches, walked with an explicit stack.
pub(crate) fn format_tree<K, V>(root: &SplayNode<K, V>, f: &mut fmt::Formatter<'_>, label: &dyn Fn(&SplayNode<K, V>) -> String) -> fmt::Result {
	// (node, depth, is_left); guides[d] is the column drawn under the ancestor at depth d
	let mut stack = vec![(root, 0usize, false)];
	let mut guides: Vec<&'static str> = Vec::new();

	while let Some((node, depth, is_left)) = stack.pop() {
		guides.truncate(depth);
		let hidden = depth.saturating_sub(MAX_GUIDES);
		if hidden > 0 {
			write!(f, "[+{hidden}] ")?;
		}
		for guide in &guides[hidden..] {
			f.write_str(guide)?;
		}
		let branch = if depth == 0 || is_left { "├──" } else { "└──" };
		writeln!(f, "{branch} {}", label(node))?;

		guides.push(if depth > 0 && is_left { "│   " } else { "    " });
		if let Some(right) = node.right() {
			stack.push((right, depth + 1, false));
		}
		if let Some(left) = node.left() {
			stack.push((left, depth + 1, true));
		}
	}
	Ok(())
}
