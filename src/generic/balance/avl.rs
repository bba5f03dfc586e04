//! AVL balancing.
use super::{Balancer, EqualKeys, Removal};
use crate::generic::{
	node::{Direction, Node},
	tree::{Tree, TreeExt, TreeExtMut},
	Storage,
};

/// Height-balanced trees.
///
/// The heights of the two subtrees of any node differ by at most one.
#[derive(Clone, Copy, Debug)]
pub struct Avl;

/// Height of the right subtree minus height of the left subtree.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct BalanceFactor(pub i8);

#[inline]
fn factor<T, P, C: Storage<Node<T, BalanceFactor>>>(tree: &Tree<T, Avl, P, C>, id: usize) -> i8 {
	tree.node(id).tag().0
}

#[inline]
fn set_factor<T, P, C: Storage<Node<T, BalanceFactor>>>(
	tree: &mut Tree<T, Avl, P, C>,
	id: usize,
	f: i8,
) {
	tree.node_mut(id).set_tag(BalanceFactor(f))
}

/// Rotate and update the factors of the two nodes involved.
fn rotate<T, P, C: Storage<Node<T, BalanceFactor>>>(
	tree: &mut Tree<T, Avl, P, C>,
	id: usize,
	dir: Direction,
) -> usize {
	let pivot = tree.rotate(id, dir);
	let a = factor(tree, id);
	let b = factor(tree, pivot);

	let (a, b) = match dir {
		Direction::Left => {
			let a = a - 1 - b.max(0);
			(a, b - 1 + a.min(0))
		}
		Direction::Right => {
			let a = a + 1 - b.min(0);
			(a, b + 1 + a.max(0))
		}
	};

	set_factor(tree, id, a);
	set_factor(tree, pivot, b);
	pivot
}

/// Restore the balance of `id`, whose factor is `-2` or `2`.
///
/// Returns the new root of the subtree.
fn rebalance<T, P, C: Storage<Node<T, BalanceFactor>>>(
	tree: &mut Tree<T, Avl, P, C>,
	id: usize,
) -> usize {
	let heavy = if factor(tree, id) > 0 {
		Direction::Right
	} else {
		Direction::Left
	};

	log::trace!("rebalancing @{} ({:?} heavy)", id, heavy);
	let child = tree.node(id).child(heavy).unwrap();
	if factor(tree, child) * heavy.sign() < 0 {
		rotate(tree, child, heavy);
	}

	rotate(tree, id, heavy.opposite())
}

impl Balancer for Avl {
	type Tag = BalanceFactor;

	const EQUAL_KEYS: EqualKeys = EqualKeys::NonStrict;

	#[inline]
	fn tag() -> BalanceFactor {
		BalanceFactor(0)
	}

	fn inserted<T, P, C: Storage<Node<T, BalanceFactor>>>(tree: &mut Tree<T, Self, P, C>, id: usize) {
		let mut child = id;
		while let Some(parent) = tree.node(child).parent() {
			let side = tree.node(parent).side_of(child).unwrap();
			let f = factor(tree, parent) + side.sign();
			set_factor(tree, parent, f);

			match f {
				0 => break,
				-1 | 1 => child = parent,
				_ => {
					rebalance(tree, parent);
					break;
				}
			}
		}
	}

	fn removed<T, P, C: Storage<Node<T, BalanceFactor>>>(
		tree: &mut Tree<T, Self, P, C>,
		removal: Removal<BalanceFactor>,
	) {
		let mut current = removal.parent;
		let mut side = removal.side;

		// the subtree on `side` of `current` just lost one level.
		while let Some(id) = current {
			let f = factor(tree, id) - side.sign();
			set_factor(tree, id, f);

			let subtree = match f {
				-1 | 1 => break,
				0 => id,
				_ => {
					let root = rebalance(tree, id);
					if factor(tree, root) != 0 {
						break;
					}

					root
				}
			};

			current = tree.node(subtree).parent();
			if let Some(dir) = tree.side_in_parent(subtree) {
				side = dir
			}
		}
	}

	#[cfg(debug_assertions)]
	fn validate<T, P, C: Storage<Node<T, BalanceFactor>>>(tree: &Tree<T, Self, P, C>) {
		fn height<T, P, C: Storage<Node<T, BalanceFactor>>>(
			tree: &Tree<T, Avl, P, C>,
			id: Option<usize>,
		) -> i32 {
			match id {
				Some(id) => {
					let node = tree.node(id);
					let left = height(tree, node.left());
					let right = height(tree, node.right());
					let f = right - left;

					if f != node.tag().0 as i32 {
						panic!(
							"wrong balance factor at @{}: stored {}, actual {}",
							id,
							node.tag().0,
							f
						)
					}

					if f.abs() > 1 {
						panic!("unbalanced node @{} (factor {})", id, f)
					}

					1 + left.max(right)
				}
				None => 0,
			}
		}

		height(tree, tree.root_id());
	}
}
