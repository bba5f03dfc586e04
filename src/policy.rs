//! Comparison and hashing policies.
//!
//! A policy tells an index how to derive a key from an element and
//! when two keys or two elements are equal ([`KeyPolicy`]).
//! Sorted indexes also need to order keys ([`Policy`]),
//! hashed indexes need to hash them ([`HashPolicy`]).
//! Policies must be pure and consistent:
//! the ordering must be a strict weak ordering,
//! and equal keys must have equal hashes.
use rustc_hash::FxHasher;
use std::{
	fmt,
	hash::{Hash, Hasher},
	marker::PhantomData,
};

/// Key projection and equality, shared by every index.
pub trait KeyPolicy<T> {
	/// Key type.
	type Key: ?Sized;

	/// Project the key of an element.
	fn key<'a>(&self, element: &'a T) -> &'a Self::Key;

	fn keys_equal(&self, a: &Self::Key, b: &Self::Key) -> bool;

	fn elements_equal(&self, a: &T, b: &T) -> bool;
}

/// Policy of a sorted index.
pub trait Policy<T>: KeyPolicy<T> {
	/// Checks if `a` is strictly less than `b`.
	fn less(&self, a: &Self::Key, b: &Self::Key) -> bool;
}

/// Policy of a hashed index.
pub trait HashPolicy<T>: KeyPolicy<T> {
	/// Hash a key.
	///
	/// Equal keys must have equal hashes.
	fn hash(&self, key: &Self::Key) -> u64;
}

/// Hash a value with the default hasher.
#[inline]
pub fn fx_hash<K: Hash + ?Sized>(key: &K) -> u64 {
	let mut hasher = FxHasher::default();
	key.hash(&mut hasher);
	hasher.finish()
}

/// Key ordering.
pub trait Order<K: ?Sized> {
	fn less(&self, a: &K, b: &K) -> bool;
}

/// Equality relation.
pub trait Equivalence<K: ?Sized> {
	fn equal(&self, a: &K, b: &K) -> bool;
}

/// Key hash function.
pub trait KeyHash<K: ?Sized> {
	fn hash(&self, key: &K) -> u64;
}

/// Ordering given by [`PartialOrd`].
///
/// Incomparable values are not less than each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: ?Sized + PartialOrd> Order<K> for NaturalOrder {
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		a < b
	}
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> Order<K> for F {
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		self(a, b)
	}
}

/// Equality given by [`PartialEq`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalEq;

impl<K: ?Sized + PartialEq> Equivalence<K> for NaturalEq {
	#[inline]
	fn equal(&self, a: &K, b: &K) -> bool {
		a == b
	}
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> Equivalence<K> for F {
	#[inline]
	fn equal(&self, a: &K, b: &K) -> bool {
		self(a, b)
	}
}

/// Hash given by [`Hash`] and [`FxHasher`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FxKeyHash;

impl<K: ?Sized + Hash> KeyHash<K> for FxKeyHash {
	#[inline]
	fn hash(&self, key: &K) -> u64 {
		fx_hash(key)
	}
}

impl<K: ?Sized, F: Fn(&K) -> u64> KeyHash<K> for F {
	#[inline]
	fn hash(&self, key: &K) -> u64 {
		self(key)
	}
}

/// Default policy: elements are their own keys.
///
/// Keys are ordered by [`PartialOrd`], compared by [`PartialEq`] and hashed with [`FxHasher`].
/// Hashed indexes only need the equality and the hash.
/// Combined with [`Value`](crate::Value) it covers numbers, strings, sequences and records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: PartialEq> KeyPolicy<T> for Natural {
	type Key = T;

	#[inline]
	fn key<'a>(&self, element: &'a T) -> &'a T {
		element
	}

	#[inline]
	fn keys_equal(&self, a: &T, b: &T) -> bool {
		a == b
	}

	#[inline]
	fn elements_equal(&self, a: &T, b: &T) -> bool {
		a == b
	}
}

impl<T: PartialOrd> Policy<T> for Natural {
	#[inline]
	fn less(&self, a: &T, b: &T) -> bool {
		a < b
	}
}

impl<T: PartialEq + Hash> HashPolicy<T> for Natural {
	#[inline]
	fn hash(&self, key: &T) -> u64 {
		fx_hash(key)
	}
}

/// Policy for key-value pairs, keyed by the first component.
///
/// Two pairs are equal elements if both their keys and values are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByKey;

impl<K: PartialEq, V: PartialEq> KeyPolicy<(K, V)> for ByKey {
	type Key = K;

	#[inline]
	fn key<'a>(&self, element: &'a (K, V)) -> &'a K {
		&element.0
	}

	#[inline]
	fn keys_equal(&self, a: &K, b: &K) -> bool {
		a == b
	}

	#[inline]
	fn elements_equal(&self, a: &(K, V), b: &(K, V)) -> bool {
		a.0 == b.0 && a.1 == b.1
	}
}

impl<K: PartialOrd, V: PartialEq> Policy<(K, V)> for ByKey {
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		a < b
	}
}

impl<K: PartialEq + Hash, V: PartialEq> HashPolicy<(K, V)> for ByKey {
	#[inline]
	fn hash(&self, key: &K) -> u64 {
		fx_hash(key)
	}
}

/// Policy built from caller supplied functions.
///
/// Every function but the key projection defaults to its natural counterpart.
///
/// # Example
///
/// ```
/// use slab_index::{policy::Custom, AvlTree, Options, ResolveAction};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// let policy = Custom::by_key(|user: &User| user.name.as_str())
///     .elements_equal_by(|a: &User, b: &User| a.name == b.name && a.age == b.age);
///
/// let mut users: AvlTree<User, _> = AvlTree::with_options(
///     Options::with_policy(policy).on_duplicate_keys(ResolveAction::Insert),
/// )
/// .unwrap();
///
/// users.add(User { name: "bob".to_string(), age: 30 }).unwrap();
/// users.add(User { name: "alice".to_string(), age: 25 }).unwrap();
/// assert_eq!(users.first().unwrap().value().name, "alice");
/// ```
pub struct Custom<
	T: ?Sized,
	K: ?Sized,
	G,
	L = NaturalOrder,
	KE = NaturalEq,
	E = NaturalEq,
	H = FxKeyHash,
> {
	key: G,
	less: L,
	keys_equal: KE,
	elements_equal: E,
	hash: H,
	marker: PhantomData<fn(&T) -> &K>,
}

impl<T: ?Sized, K: ?Sized, G> Custom<T, K, G> {
	/// Creates a policy projecting keys with `key`.
	#[inline]
	pub fn by_key(key: G) -> Self
	where
		G: Fn(&T) -> &K,
	{
		Custom {
			key,
			less: NaturalOrder,
			keys_equal: NaturalEq,
			elements_equal: NaturalEq,
			hash: FxKeyHash,
			marker: PhantomData,
		}
	}
}

impl<T: ?Sized, K: ?Sized, G, L, KE, E, H> Custom<T, K, G, L, KE, E, H> {
	/// Order keys with the given "less-than" function.
	#[inline]
	pub fn ordered_by<F>(self, less: F) -> Custom<T, K, G, F, KE, E, H>
	where
		F: Fn(&K, &K) -> bool,
	{
		Custom {
			key: self.key,
			less,
			keys_equal: self.keys_equal,
			elements_equal: self.elements_equal,
			hash: self.hash,
			marker: PhantomData,
		}
	}

	#[inline]
	pub fn keys_equal_by<F>(self, keys_equal: F) -> Custom<T, K, G, L, F, E, H>
	where
		F: Fn(&K, &K) -> bool,
	{
		Custom {
			key: self.key,
			less: self.less,
			keys_equal,
			elements_equal: self.elements_equal,
			hash: self.hash,
			marker: PhantomData,
		}
	}

	#[inline]
	pub fn elements_equal_by<F>(self, elements_equal: F) -> Custom<T, K, G, L, KE, F, H>
	where
		F: Fn(&T, &T) -> bool,
	{
		Custom {
			key: self.key,
			less: self.less,
			keys_equal: self.keys_equal,
			elements_equal,
			hash: self.hash,
			marker: PhantomData,
		}
	}

	/// Hash keys with the given function.
	///
	/// It must be consistent with the key equality.
	#[inline]
	pub fn hashed_by<F>(self, hash: F) -> Custom<T, K, G, L, KE, E, F>
	where
		F: Fn(&K) -> u64,
	{
		Custom {
			key: self.key,
			less: self.less,
			keys_equal: self.keys_equal,
			elements_equal: self.elements_equal,
			hash,
			marker: PhantomData,
		}
	}
}

impl<T, K: ?Sized, G, L, KE, E, H> KeyPolicy<T> for Custom<T, K, G, L, KE, E, H>
where
	G: Fn(&T) -> &K,
	KE: Equivalence<K>,
	E: Equivalence<T>,
{
	type Key = K;

	#[inline]
	fn key<'a>(&self, element: &'a T) -> &'a K {
		(self.key)(element)
	}

	#[inline]
	fn keys_equal(&self, a: &K, b: &K) -> bool {
		self.keys_equal.equal(a, b)
	}

	#[inline]
	fn elements_equal(&self, a: &T, b: &T) -> bool {
		self.elements_equal.equal(a, b)
	}
}

impl<T, K: ?Sized, G, L, KE, E, H> Policy<T> for Custom<T, K, G, L, KE, E, H>
where
	G: Fn(&T) -> &K,
	L: Order<K>,
	KE: Equivalence<K>,
	E: Equivalence<T>,
{
	#[inline]
	fn less(&self, a: &K, b: &K) -> bool {
		self.less.less(a, b)
	}
}

impl<T, K: ?Sized, G, L, KE, E, H> HashPolicy<T> for Custom<T, K, G, L, KE, E, H>
where
	G: Fn(&T) -> &K,
	KE: Equivalence<K>,
	E: Equivalence<T>,
	H: KeyHash<K>,
{
	#[inline]
	fn hash(&self, key: &K) -> u64 {
		self.hash.hash(key)
	}
}

impl<T: ?Sized, K: ?Sized, G: Clone, L: Clone, KE: Clone, E: Clone, H: Clone> Clone
	for Custom<T, K, G, L, KE, E, H>
{
	fn clone(&self) -> Self {
		Custom {
			key: self.key.clone(),
			less: self.less.clone(),
			keys_equal: self.keys_equal.clone(),
			elements_equal: self.elements_equal.clone(),
			hash: self.hash.clone(),
			marker: PhantomData,
		}
	}
}

impl<T: ?Sized, K: ?Sized, G, L, KE, E, H> fmt::Debug for Custom<T, K, G, L, KE, E, H> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Custom").finish_non_exhaustive()
	}
}
