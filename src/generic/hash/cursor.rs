use super::{Entry, HashIndex};
use crate::{
	generic::{node::Direction, Storage},
	policy::{HashPolicy, KeyPolicy},
	Address,
};
use std::{fmt, iter::FusedIterator};

/// Handle on one element of a hashed index.
///
/// Stepping with [`Cursor::next`] and [`Cursor::prev`] stays inside the element's bucket.
pub struct Cursor<'a, T, P, C> {
	index: &'a HashIndex<T, P, C>,
	id: usize,
}

impl<'a, T, P, C> Clone for Cursor<'a, T, P, C> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, T, P, C> Copy for Cursor<'a, T, P, C> {}

impl<'a, T, P, C: Storage<Entry<T>>> Cursor<'a, T, P, C> {
	#[inline]
	pub(crate) fn new(index: &'a HashIndex<T, P, C>, id: usize) -> Self {
		Cursor { index, id }
	}

	#[inline]
	pub fn address(&self) -> Address {
		Address::new(self.id)
	}

	#[inline]
	pub fn value(&self) -> &'a T {
		self.index.entry(self.id).item()
	}

	#[inline]
	pub fn key(&self) -> &'a P::Key
	where
		P: KeyPolicy<T>,
	{
		self.index.policy.key(self.value())
	}

	/// Slot of the bucket holding the element.
	#[inline]
	pub fn bucket(&self) -> usize {
		self.index.entry(self.id).bucket
	}

	/// Next element of the same bucket.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn next(&self) -> Option<Self> {
		self.index
			.entry(self.id)
			.next
			.map(|id| Cursor::new(self.index, id))
	}

	/// Previous element of the same bucket.
	#[inline]
	pub fn prev(&self) -> Option<Self> {
		self.index
			.entry(self.id)
			.prev
			.map(|id| Cursor::new(self.index, id))
	}
}

impl<'a, T, P, C> PartialEq for Cursor<'a, T, P, C> {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && std::ptr::eq(self.index, other.index)
	}
}

impl<'a, T, P, C> Eq for Cursor<'a, T, P, C> {}

impl<'a, T: fmt::Debug, P, C: Storage<Entry<T>>> fmt::Debug for Cursor<'a, T, P, C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}:{:?}", self.address(), self.value())
	}
}

enum Scope<'a, K: ?Sized> {
	Empty,

	/// The whole index, in slot order.
	All,

	/// Entries of the bucket in `slot` with the given key.
	Key { slot: usize, key: &'a K },
}

impl<'a, K: ?Sized> Clone for Scope<'a, K> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, K: ?Sized> Copy for Scope<'a, K> {}

/// Span of elements of a hashed index.
///
/// Either the whole index or the elements sharing a key.
pub struct Range<'a, T, P: HashPolicy<T>, C> {
	index: &'a HashIndex<T, P, C>,
	scope: Scope<'a, P::Key>,
	reversed: bool,
}

impl<'a, T, P: HashPolicy<T>, C> Clone for Range<'a, T, P, C> {
	#[inline]
	fn clone(&self) -> Self {
		Range {
			index: self.index,
			scope: self.scope,
			reversed: self.reversed,
		}
	}
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> Range<'a, T, P, C> {
	#[inline]
	pub fn empty(index: &'a HashIndex<T, P, C>) -> Self {
		Range {
			index,
			scope: Scope::Empty,
			reversed: false,
		}
	}

	#[inline]
	pub(crate) fn all(index: &'a HashIndex<T, P, C>) -> Self {
		Range {
			index,
			scope: Scope::All,
			reversed: false,
		}
	}

	#[inline]
	pub(crate) fn key(index: &'a HashIndex<T, P, C>, slot: usize, key: &'a P::Key) -> Self {
		Range {
			index,
			scope: Scope::Key { slot, key },
			reversed: false,
		}
	}

	/// Returns the same range, iterated the other way around.
	#[inline]
	pub fn reverse(mut self) -> Self {
		self.reversed = !self.reversed;
		self
	}

	#[inline]
	pub fn is_reversed(&self) -> bool {
		self.reversed
	}

	/// Number of elements in the range.
	///
	/// Scans the bucket for a key range.
	pub fn len(&self) -> usize {
		match self.scope {
			Scope::Empty => 0,
			Scope::All => self.index.len,
			Scope::Key { slot, key } => self
				.index
				.bucket_ids(slot)
				.filter(|&id| self.matches(key, id))
				.count(),
		}
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.end(Direction::Right).is_none()
	}

	#[inline]
	fn matches(&self, key: &P::Key, id: usize) -> bool {
		let policy = &self.index.policy;
		policy.keys_equal(key, policy.key(self.index.entry(id).item()))
	}

	/// Step from `id` inside the scope.
	fn step(&self, id: usize, dir: Direction) -> Option<usize> {
		match self.scope {
			Scope::Empty => None,
			Scope::All => self.index.step_all(id, dir),
			Scope::Key { key, .. } => {
				let mut current = self.index.entry(id).neighbor(dir);
				while let Some(id) = current {
					if self.matches(key, id) {
						break;
					}

					current = self.index.entry(id).neighbor(dir)
				}

				current
			}
		}
	}

	/// First entry of the scope when walking in the direction `dir`
	/// (`Right` gives the first entry in index order, `Left` the last).
	fn end(&self, dir: Direction) -> Option<usize> {
		match self.scope {
			Scope::Empty => None,
			Scope::All => match dir {
				Direction::Left => self.index.last_id(),
				Direction::Right => self.index.first_id(),
			},
			Scope::Key { slot, key } => {
				let id = self.index.bucket_end(slot, dir)?;
				if self.matches(key, id) {
					Some(id)
				} else {
					self.step(id, dir)
				}
			}
		}
	}

	/// Cursor on the first element yielded by the range.
	#[inline]
	pub fn first(&self) -> Option<Cursor<'a, T, P, C>> {
		let dir = if self.reversed {
			Direction::Left
		} else {
			Direction::Right
		};

		self.end(dir).map(|id| Cursor::new(self.index, id))
	}

	/// Cursor on the last element yielded by the range.
	#[inline]
	pub fn last(&self) -> Option<Cursor<'a, T, P, C>> {
		let dir = if self.reversed {
			Direction::Right
		} else {
			Direction::Left
		};

		self.end(dir).map(|id| Cursor::new(self.index, id))
	}

	#[inline]
	pub fn iter(&self) -> RangeIter<'a, T, P, C> {
		RangeIter {
			range: self.clone(),
			front: self.end(Direction::Right),
			back: self.end(Direction::Left),
			len: self.len(),
		}
	}
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> IntoIterator for Range<'a, T, P, C> {
	type Item = &'a T;
	type IntoIter = RangeIter<'a, T, P, C>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'r, 'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> IntoIterator for &'r Range<'a, T, P, C> {
	type Item = &'a T;
	type IntoIter = RangeIter<'a, T, P, C>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T: fmt::Debug, P: HashPolicy<T>, C: Storage<Entry<T>>> fmt::Debug for Range<'a, T, P, C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

/// Iterator over the elements of a hashed index [`Range`].
pub struct RangeIter<'a, T, P: HashPolicy<T>, C> {
	range: Range<'a, T, P, C>,

	/// Next entries on both ends, in index order.
	front: Option<usize>,
	back: Option<usize>,

	/// Remaining elements.
	len: usize,
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> RangeIter<'a, T, P, C> {
	/// Pop the next entry on the given end, in index order.
	fn pop(&mut self, dir: Direction) -> Option<&'a T> {
		if self.len == 0 {
			return None;
		}

		let end = match dir {
			Direction::Right => &mut self.front,
			Direction::Left => &mut self.back,
		};

		let id = (*end)?;
		*end = self.range.step(id, dir);
		self.len -= 1;

		Some(self.range.index.entry(id).item())
	}
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> Iterator for RangeIter<'a, T, P, C> {
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		if self.range.reversed {
			self.pop(Direction::Left)
		} else {
			self.pop(Direction::Right)
		}
	}
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> DoubleEndedIterator
	for RangeIter<'a, T, P, C>
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		if self.range.reversed {
			self.pop(Direction::Right)
		} else {
			self.pop(Direction::Left)
		}
	}
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> ExactSizeIterator for RangeIter<'a, T, P, C> {}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> FusedIterator for RangeIter<'a, T, P, C> {}
