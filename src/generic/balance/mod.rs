//! Tree balancing strategies.
use crate::generic::{
	node::{Direction, Node},
	tree::Tree,
	Storage,
};
use std::fmt;

pub mod avl;
pub mod red_black;

pub use avl::Avl;
pub use red_black::RedBlack;

/// How the elements sharing a key are located in a tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EqualKeys {
	/// Equal keys are always clustered to the right of the topmost equal node.
	///
	/// The span is found by walking forward from the topmost match.
	Strict,

	/// Rotations may move equal keys to the left of the topmost equal node.
	///
	/// Both ends of the span are searched independently.
	NonStrict,
}

/// Structural change performed by a removal, handed to [`Balancer::removed`].
#[derive(Clone, Copy, Debug)]
pub struct Removal<G> {
	/// Tag of the removed node.
	pub tag: G,

	/// Child that took the place of the removed node, if any.
	pub replacement: Option<usize>,

	/// Parent of the removed node (now parent of `replacement`).
	pub parent: Option<usize>,

	/// Side of the removed node in `parent`.
	pub side: Direction,
}

/// Tree balancer.
///
/// A balancer stores a tag in each node and restores its invariants after every insertion and
/// removal, using the tree rotations of [`TreeExtMut`](crate::generic::tree::TreeExtMut).
pub trait Balancer: Sized {
	/// State stored in each node.
	type Tag: Clone + fmt::Debug;

	const EQUAL_KEYS: EqualKeys;

	/// Tag of a freshly inserted node.
	fn tag() -> Self::Tag;

	/// Called after the node `id` has been attached as a leaf.
	fn inserted<T, P, C: Storage<Node<T, Self::Tag>>>(tree: &mut Tree<T, Self, P, C>, id: usize);

	/// Called after a node with at most one child has been spliced out.
	fn removed<T, P, C: Storage<Node<T, Self::Tag>>>(
		tree: &mut Tree<T, Self, P, C>,
		removal: Removal<Self::Tag>,
	);

	/// Panics if the balancer invariants do not hold.
	#[cfg(debug_assertions)]
	fn validate<T, P, C: Storage<Node<T, Self::Tag>>>(_tree: &Tree<T, Self, P, C>) {}
}

/// Plain binary search tree, never rebalanced.
#[derive(Clone, Copy, Debug)]
pub struct Unbalanced;

impl Balancer for Unbalanced {
	type Tag = ();

	const EQUAL_KEYS: EqualKeys = EqualKeys::Strict;

	#[inline]
	fn tag() {}

	#[inline]
	fn inserted<T, P, C: Storage<Node<T, ()>>>(_tree: &mut Tree<T, Self, P, C>, _id: usize) {}

	#[inline]
	fn removed<T, P, C: Storage<Node<T, ()>>>(
		_tree: &mut Tree<T, Self, P, C>,
		_removal: Removal<()>,
	) {
	}
}
