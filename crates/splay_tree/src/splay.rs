//! Top-down splaying after Sleator and Tarjan, "Self-Adjusting Binary Search Trees" (1985).
//! The walk from the root splits the tree into a left chain of nodes smaller than the target
//! and a right chain of larger ones, then reassembles both around the last node visited.
use std::borrow::Borrow;
use std::cmp::Ordering;

use tracing::trace;

use crate::node::{Link, SplayNode};

/// Splays `root` around `key`.
///
/// Returns the new root and how `key` compares to the new root's key. If `key` is present it
/// ends up at the root; otherwise the root is the node where a search for `key` stopped, which
/// is either its predecessor or its successor.
pub(crate) fn splay<K, V, Q>(root: Box<SplayNode<K, V>>, key: &Q) -> (Box<SplayNode<K, V>>, Ordering)
where
	K: Borrow<Q>,
	Q: Ord + ?Sized,
{
	splay_by(root, |node| key.cmp(node.key.borrow()))
}

/// Splays the leftmost node of `root` to the top.
///
/// The leftmost node is the one on the left spine without a left child, so answering `Equal`
/// for it and `Less` everywhere else performs exactly the splay a lookup of the minimum key does.
pub(crate) fn splay_min<K, V>(root: Box<SplayNode<K, V>>) -> Box<SplayNode<K, V>> {
	splay_by(root, |node| if node.left.is_some() { Ordering::Less } else { Ordering::Equal }).0
}

/// Mirror of [`splay_min`].
pub(crate) fn splay_max<K, V>(root: Box<SplayNode<K, V>>) -> Box<SplayNode<K, V>> {
	splay_by(root, |node| if node.right.is_some() { Ordering::Greater } else { Ordering::Equal }).0
}

/// The splay loop itself. `probe` reports where the target lies relative to a node, in the
/// sense of `target.cmp(node.key)`.
fn splay_by<K, V, F>(mut current: Box<SplayNode<K, V>>, mut probe: F) -> (Box<SplayNode<K, V>>, Ordering)
where
	F: FnMut(&SplayNode<K, V>) -> Ordering,
{
	// Heads of the two chains, plus cursors at the child slot where the next node gets linked.
	// Nodes in `smaller` are linked through their right slot, nodes in `larger` through their left.
	let mut smaller: Link<K, V> = None;
	let mut larger: Link<K, V> = None;
	let mut smaller_tail = &mut smaller;
	let mut larger_tail = &mut larger;

	let ordering = loop {
		match probe(&current) {
			Ordering::Equal => break Ordering::Equal,
			Ordering::Less => {
				let Some(mut next) = current.left.take() else {
					break Ordering::Less;
				};
				if probe(&next) == Ordering::Less {
					// zig-zig: rotate right so two left steps cost one link
					current.left = next.right.take();
					next.right = Some(current);
					current = next;
					match current.left.take() {
						Some(left) => next = left,
						None => break Ordering::Less,
					}
				}
				larger_tail = &mut larger_tail.insert(current).left;
				current = next;
			}
			Ordering::Greater => {
				let Some(mut next) = current.right.take() else {
					break Ordering::Greater;
				};
				if probe(&next) == Ordering::Greater {
					// zag-zag
					current.right = next.left.take();
					next.left = Some(current);
					current = next;
					match current.right.take() {
						Some(right) => next = right,
						None => break Ordering::Greater,
					}
				}
				smaller_tail = &mut smaller_tail.insert(current).right;
				current = next;
			}
		}
	};

	// assemble
	*smaller_tail = current.left.take();
	*larger_tail = current.right.take();
	current.left = smaller;
	current.right = larger;

	trace!(found = ordering == Ordering::Equal, "splay assembled");
	(current, ordering)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn leaf(key: i32) -> Box<SplayNode<i32, ()>> {
		Box::new(SplayNode::new(key, ()))
	}

	fn branch(key: i32, left: Link<i32, ()>, right: Link<i32, ()>) -> Box<SplayNode<i32, ()>> {
		let mut node = leaf(key);
		node.left = left;
		node.right = right;
		node
	}

	/// Left spine 5 -> 4 -> 3 -> 2 -> 1, the shape ascending inserts produce.
	fn left_spine() -> Box<SplayNode<i32, ()>> {
		(2..=5).fold(leaf(1), |acc, key| branch(key, Some(acc), None))
	}

	fn shape(node: Option<&SplayNode<i32, ()>>) -> String {
		match node {
			None => "-".into(),
			Some(n) if n.left.is_none() && n.right.is_none() => n.key.to_string(),
			Some(n) => format!("{}({} {})", n.key, shape(n.left()), shape(n.right())),
		}
	}

	#[test]
	fn test_splay_root_key_is_noop() {
		let root = branch(2, Some(leaf(1)), Some(leaf(3)));
		let (root, ordering) = splay(root, &2);
		assert_eq!(ordering, Ordering::Equal);
		assert_eq!(shape(Some(&*root)), "2(1 3)");
	}

	#[test]
	fn test_zig() {
		let root = branch(2, Some(leaf(1)), Some(leaf(3)));
		let (root, ordering) = splay(root, &1);
		assert_eq!(ordering, Ordering::Equal);
		assert_eq!(shape(Some(&*root)), "1(- 2(- 3))");
	}

	#[test]
	fn test_zig_zig_folds_left_spine() {
		let (root, ordering) = splay(left_spine(), &1);
		assert_eq!(ordering, Ordering::Equal);
		assert_eq!(shape(Some(&*root)), "1(- 4(2(- 3) 5))");
	}

	#[test]
	fn test_zig_zag() {
		let root = branch(3, Some(branch(1, None, Some(leaf(2)))), None);
		let (root, ordering) = splay(root, &2);
		assert_eq!(ordering, Ordering::Equal);
		assert_eq!(shape(Some(&*root)), "2(1 3)");
	}

	#[test]
	fn test_missing_key_lands_on_neighbour() {
		let root = branch(10, Some(branch(5, None, None)), Some(branch(20, None, None)));

		let (root, ordering) = splay(root, &7);
		assert_eq!(ordering, Ordering::Greater);
		assert_eq!(root.key, 5);

		let (root, ordering) = splay(root, &15);
		assert_eq!(ordering, Ordering::Less);
		assert_eq!(root.key, 20);
	}

	#[test]
	fn test_out_of_range_keys_reach_extremes() {
		let (root, ordering) = splay(left_spine(), &100);
		assert_eq!(ordering, Ordering::Greater);
		assert_eq!(root.key, 5);
		assert!(root.right.is_none());

		let (root, ordering) = splay(root, &-100);
		assert_eq!(ordering, Ordering::Less);
		assert_eq!(root.key, 1);
		assert!(root.left.is_none());
	}

	#[test]
	fn test_splay_min_matches_key_splay() {
		let by_key = splay(left_spine(), &1).0;
		let by_min = splay_min(left_spine());
		assert_eq!(shape(Some(&*by_key)), shape(Some(&*by_min)));
	}

	#[test]
	fn test_splay_max_matches_key_splay() {
		let right_spine = (2..=5).rev().fold(leaf(6), |acc, key| branch(key, None, Some(acc)));
		let same_spine = (2..=5).rev().fold(leaf(6), |acc, key| branch(key, None, Some(acc)));

		let by_key = splay(right_spine, &6).0;
		let by_max = splay_max(same_spine);
		assert_eq!(shape(Some(&*by_key)), shape(Some(&*by_max)));
		assert_eq!(by_max.key, 6);
	}

	#[test]
	fn test_borrowed_probe() {
		let mut root = Box::new(SplayNode::new(String::from("m"), ()));
		root.left = Some(Box::new(SplayNode::new(String::from("c"), ())));
		let (root, ordering) = splay(root, "c");
		assert_eq!(ordering, Ordering::Equal);
		assert_eq!(root.key, "c");
	}
}
