use crate::{Address, Error};

/// Outcome of a successful insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insertion<T> {
	/// The element has been stored at the given address.
	Inserted(Address),

	/// The element overwrote the one stored at the given address,
	/// which is returned.
	Replaced(Address, T),

	/// A duplicate is stored at the given address and was kept.
	/// The rejected element is returned.
	Ignored(Address, T),
}

impl<T> Insertion<T> {
	/// Address of the stored element after the insertion.
	#[inline]
	pub fn address(&self) -> Address {
		match self {
			Insertion::Inserted(addr) => *addr,
			Insertion::Replaced(addr, _) => *addr,
			Insertion::Ignored(addr, _) => *addr,
		}
	}

	/// Checks if a new entry was created.
	#[inline]
	pub fn is_new(&self) -> bool {
		matches!(self, Insertion::Inserted(_))
	}
}

/// Operations shared by every index.
///
/// This lets collaborators (dictionaries, multi-maps, sets) be generic over the indexing
/// strategy.
pub trait Indexed<T> {
	/// Key type.
	type Key: ?Sized;

	/// Span of elements sharing a key.
	type Range<'a>: IntoIterator<Item = &'a T>
	where
		Self: 'a,
		T: 'a,
		Self::Key: 'a;

	/// Iterator over every element.
	type Iter<'a>: Iterator<Item = &'a T>
	where
		Self: 'a,
		T: 'a;

	/// Number of stored elements.
	fn len(&self) -> usize;

	#[inline]
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Insert an element, applying the duplicate resolution policy.
	fn add(&mut self, element: T) -> Result<Insertion<T>, Error>;

	/// Checks if an element equal to `element` is stored.
	fn has(&self, element: &T) -> bool;

	/// Address of the first element with the given key.
	fn find_key(&self, key: &Self::Key) -> Option<Address>;

	#[inline]
	fn has_key(&self, key: &Self::Key) -> bool {
		self.find_key(key).is_some()
	}

	fn get(&self, addr: Address) -> Option<&T>;

	fn get_mut(&mut self, addr: Address) -> Option<&mut T>;

	/// Every element with the given key.
	fn equal_keys<'a>(&'a self, key: &'a Self::Key) -> Self::Range<'a>;

	/// Delete one element equal to `element`.
	///
	/// Returns `false` if there is no such element.
	fn delete(&mut self, element: &T) -> bool;

	/// Delete every element equal to `element` and returns how many were deleted.
	fn delete_all(&mut self, element: &T) -> usize;

	/// Delete every element with the given key and returns how many were deleted.
	fn delete_key(&mut self, key: &Self::Key) -> usize;

	/// Delete the element at the given address.
	fn delete_at(&mut self, addr: Address) -> Option<T>;

	fn clear(&mut self);

	fn iter(&self) -> Self::Iter<'_>;
}
