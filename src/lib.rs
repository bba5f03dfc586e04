//! Indexed collections backed by slabs.
//!
//! This crate provides the indexes on which dictionaries, multi-maps and sets can be built:
//!   - sorted indexes, based on binary search trees ([`AvlTree`], [`RedBlackTree`] and the
//!     unbalanced [`SearchTree`]);
//!   - hashed indexes, based on a fixed number of chained buckets ([`HashIndex`]).
//!
//! Every index derives a key from its elements through a [`KeyPolicy`],
//! supports elements sharing a key according to a [`Resolve`] policy,
//! and gives access to its elements through [`Address`]es and cursors.
//! The [`Indexed`] trait gathers the operations shared by all indexes.
//!
//! Nodes are allocated in a slab-like container, [`slab::Slab`] by default.
//! The [`generic`] module exposes the index types for any container implementing the
//! [`cc_traits`] slab operations.
//!
//! ```
//! use slab_index::{Indexed, RedBlackTree};
//!
//! let mut tree: RedBlackTree<&str> = RedBlackTree::new();
//! tree.add("pear").unwrap();
//! tree.add("apple").unwrap();
//! tree.add("fig").unwrap();
//!
//! assert_eq!(tree.first().map(|c| *c.value()), Some("apple"));
//! assert!(tree.add("fig").is_err());
//! ```
pub mod generic;
pub mod policy;
pub mod value;

mod addr;
mod error;
mod index;
mod options;
mod resolve;

pub use addr::Address;
pub use error::Error;
pub use index::{Indexed, Insertion};
pub use options::{Options, DEFAULT_CAPACITY};
pub use policy::{ByKey, Custom, HashPolicy, KeyPolicy, Natural, Policy};
pub use resolve::{Resolve, ResolveAction};
pub use value::Value;

#[cfg(feature = "std-slab")]
use slab::Slab;

/// Unbalanced binary search tree based on `Slab`.
#[cfg(feature = "std-slab")]
pub type SearchTree<T, P = Natural> =
	generic::Tree<T, generic::Unbalanced, P, Slab<generic::Node<T, ()>>>;

/// AVL tree based on `Slab`.
#[cfg(feature = "std-slab")]
pub type AvlTree<T, P = Natural> =
	generic::Tree<T, generic::Avl, P, Slab<generic::Node<T, generic::avl::BalanceFactor>>>;

/// Red-Black tree based on `Slab`.
#[cfg(feature = "std-slab")]
pub type RedBlackTree<T, P = Natural> =
	generic::Tree<T, generic::RedBlack, P, Slab<generic::Node<T, generic::red_black::Color>>>;

/// Hashed index based on `Slab`.
#[cfg(feature = "std-slab")]
pub type HashIndex<T, P = Natural> = generic::HashIndex<T, P, Slab<generic::hash::Entry<T>>>;
