//! Generic index types.
//!
//! Types defined in this modules are independant of the actual storage type.
//! Any container implementing "slab-like" functionalities through the [`cc_traits`]
//! collection traits can be used.
use cc_traits::{
	Clear, Collection, Get, GetMut, Insert, Remove, SimpleCollectionMut, SimpleCollectionRef,
};

pub mod balance;
pub mod hash;
pub mod node;
pub mod tree;

pub use balance::{avl, red_black, Avl, Balancer, RedBlack, Unbalanced};
pub use hash::HashIndex;
pub use node::{Direction, Node};
pub use tree::Tree;

/// Slab-like arena storing the nodes of an index.
///
/// Automatically implemented by any container providing slab operations.
pub trait Storage<T>:
	Collection<Item = T>
	+ Get<usize>
	+ GetMut<usize>
	+ Insert<Output = usize>
	+ Remove<usize>
	+ Clear
	+ SimpleCollectionRef
	+ SimpleCollectionMut
{
}

impl<T, S> Storage<T> for S where
	S: Collection<Item = T>
		+ Get<usize>
		+ GetMut<usize>
		+ Insert<Output = usize>
		+ Remove<usize>
		+ Clear
		+ SimpleCollectionRef
		+ SimpleCollectionMut
{
}
