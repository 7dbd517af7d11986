use std::fmt::{self, Display};

pub(crate) type Link<K, V> = Option<Box<SplayNode<K, V>>>;

/// A single tree cell. Each node owns its two subtrees; there is no parent link.
///
/// Nodes are only reachable through shared references from outside the crate,
/// so callers can walk the tree but never rewire it.
#[derive(Debug)]
pub struct SplayNode<K, V> {
	pub(crate) key: K,
	pub(crate) value: V,
	pub(crate) left: Link<K, V>,
	pub(crate) right: Link<K, V>,
}

impl<K, V> SplayNode<K, V> {
	pub(crate) const fn new(key: K, value: V) -> Self {
		Self {
			key,
			value,
			left: None,
			right: None,
		}
	}

	#[must_use]
	pub const fn key(&self) -> &K {
		&self.key
	}

	#[must_use]
	pub const fn value(&self) -> &V {
		&self.value
	}

	#[must_use]
	pub fn left(&self) -> Option<&Self> {
		self.left.as_deref()
	}

	#[must_use]
	pub fn right(&self) -> Option<&Self> {
		self.right.as_deref()
	}

	pub(crate) fn into_entry(self) -> (K, V) {
		(self.key, self.value)
	}
}

struct KeyOf<'a, K, V>(Option<&'a SplayNode<K, V>>);

impl<K: Display, V> Display for KeyOf<'_, K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			Some(node) => write!(f, "{}", node.key),
			None => f.write_str("-"),
		}
	}
}

impl<K: Display, V> Display for SplayNode<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Node[{}] => (L:{}, R:{})", self.key, KeyOf(self.left()), KeyOf(self.right()))
	}
}
