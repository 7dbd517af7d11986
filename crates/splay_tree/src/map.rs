use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};
use std::mem;

use tracing::{error, warn};

use crate::error::{Result, SplayError};
use crate::node::SplayNode;
use crate::tree::{format_tree, SplayTree};

/// Associative-container view over [`SplayTree`].
///
/// Values are opaque to the tree; use `Option<V>` as the value type to store absent values.
/// Probing lookups (`get`, `contains_key`) treat an absent key as a miss instead of an error.
/// The bulk views are not supported and always return [`SplayError::Unsupported`].
#[derive(Debug)]
pub struct SplayTreeMap<K, V> {
	tree: SplayTree<K, V>,
}

impl<K, V> Default for SplayTreeMap<K, V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<K, V> SplayTreeMap<K, V> {
	#[must_use]
	pub const fn new() -> Self {
		Self { tree: SplayTree::new() }
	}

	#[must_use]
	pub const fn size(&self) -> usize {
		self.tree.size()
	}

	#[must_use]
	pub const fn is_empty(&self) -> bool {
		self.tree.is_empty()
	}

	#[must_use]
	pub const fn tree(&self) -> &SplayTree<K, V> {
		&self.tree
	}

	pub fn min_key(&mut self) -> Option<&K> {
		self.tree.min_key()
	}

	pub fn max_key(&mut self) -> Option<&K> {
		self.tree.max_key()
	}

	/// # Errors
	///
	/// Always [`SplayError::Unsupported`].
	pub fn clear(&mut self) -> Result<()> {
		Err(unsupported("clear"))
	}

	/// # Errors
	///
	/// Always [`SplayError::Unsupported`].
	pub fn contains_value(&self, _value: &V) -> Result<bool> {
		Err(unsupported("contains_value"))
	}

	/// # Errors
	///
	/// Always [`SplayError::Unsupported`].
	pub fn entry_set(&self) -> Result<Vec<(&K, &V)>> {
		Err(unsupported("entry_set"))
	}

	/// # Errors
	///
	/// Always [`SplayError::Unsupported`].
	pub fn key_set(&self) -> Result<Vec<&K>> {
		Err(unsupported("key_set"))
	}

	/// # Errors
	///
	/// Always [`SplayError::Unsupported`].
	pub fn values(&self) -> Result<Vec<&V>> {
		Err(unsupported("values"))
	}
}

fn unsupported(operation: &'static str) -> SplayError {
	warn!(operation, "Unsupported map operation called");
	SplayError::Unsupported(operation)
}

impl<K: Ord, V> SplayTreeMap<K, V> {
	/// Adds a mapping only if `key` is absent. See [`SplayTree::insert`].
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn insert(&mut self, key: impl Into<Option<K>>, value: V) -> Result<bool> {
		self.tree.insert(key, value)
	}

	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn delete<Q>(&mut self, key: Option<&Q>) -> Result<bool>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.tree.delete(key)
	}

	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`.
	pub fn find<Q>(&mut self, key: Option<&Q>) -> Result<Option<&SplayNode<K, V>>>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.tree.find(key)
	}

	pub fn contains_key<Q>(&mut self, key: Option<&Q>) -> bool
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.tree.contains(key)
	}

	pub fn get<Q>(&mut self, key: Option<&Q>) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.tree.lookup(key?).map(SplayNode::value)
	}

	pub fn get_mut<Q>(&mut self, key: Option<&Q>) -> Option<&mut V>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		self.tree.lookup_mut(key?).map(|node| &mut node.value)
	}

	/// Binds `value` to `key`, returning the value it replaced, if any.
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`, and
	/// [`SplayError::InvariantViolation`] if the insert contradicts the lookup before it.
	pub fn put(&mut self, key: impl Into<Option<K>>, value: V) -> Result<Option<V>> {
		let key = key.into().ok_or(SplayError::InvalidArgument("null key"))?;
		if let Some(node) = self.tree.lookup_mut(&key) {
			return Ok(Some(mem::replace(&mut node.value, value)));
		}

		if self.tree.insert_entry(key, value) {
			Ok(None)
		} else {
			error!("lookup missed a key that insert then found present");
			Err(SplayError::InvariantViolation("lookup returned no node but insert found the key present".into()))
		}
	}

	/// Removes `key`, returning the value it was bound to.
	///
	/// # Errors
	///
	/// [`SplayError::InvalidArgument`] when `key` is `None`, and
	/// [`SplayError::InvariantViolation`] if the delete contradicts the lookup before it.
	pub fn remove<Q>(&mut self, key: Option<&Q>) -> Result<Option<V>>
	where
		K: Borrow<Q>,
		Q: Ord + ?Sized,
	{
		let key = key.ok_or(SplayError::InvalidArgument("null key"))?;
		if self.tree.lookup(key).is_none() {
			return Ok(None);
		}

		match self.tree.remove_entry(key) {
			Some((_, value)) => Ok(Some(value)),
			None => {
				error!("lookup found a key that delete then could not remove");
				Err(SplayError::InvariantViolation("lookup returned a node but delete failed".into()))
			}
		}
	}

	/// Inserts every pair whose key is not already mapped; existing mappings are kept.
	/// Returns how many pairs were added.
	pub fn put_all<I>(&mut self, entries: I) -> usize
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut added = 0;
		for (key, value) in entries {
			if self.tree.insert_entry(key, value) {
				added += 1;
			}
		}
		added
	}
}

impl<K: Ord, V> FromIterator<(K, V)> for SplayTreeMap<K, V> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		map.put_all(iter);
		map
	}
}

impl<K: Debug, V: Debug> Display for SplayTreeMap<K, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.tree.root() {
			Some(root) => {
				writeln!(f, "SplayTreeMap (size: {}):", self.size())?;
				format_tree(root, f, &|node| format!("({:?}, {:?})", node.key(), node.value()))
			}
			None => writeln!(f, "SplayTreeMap: <empty>"),
		}
	}
}
