use crate::{
	generic::{node::Direction, Storage},
	policy::HashPolicy,
	resolve::{resolve, Resolution},
	Address, Error, Indexed, Insertion, Options, Resolve, DEFAULT_CAPACITY,
};
use smallvec::SmallVec;
use std::{fmt, marker::PhantomData};

mod cursor;

pub use cursor::*;

/// Hashed index entry.
///
/// Entries of a same bucket form a doubly linked chain, in insertion order.
#[derive(Clone, Debug)]
pub struct Entry<T> {
	item: T,

	/// Slot of the bucket holding the entry.
	bucket: usize,

	prev: Option<usize>,
	next: Option<usize>,
}

impl<T> Entry<T> {
	#[inline]
	pub fn item(&self) -> &T {
		&self.item
	}

	#[inline]
	pub fn into_item(self) -> T {
		self.item
	}

	#[inline]
	pub fn bucket(&self) -> usize {
		self.bucket
	}

	/// Neighbor in the bucket chain.
	#[inline]
	pub fn neighbor(&self, dir: Direction) -> Option<usize> {
		match dir {
			Direction::Left => self.prev,
			Direction::Right => self.next,
		}
	}
}

/// Chain of entries whose keys hash to the same slot.
#[derive(Clone, Copy, Default, Debug)]
struct Bucket {
	head: Option<usize>,
	tail: Option<usize>,
	len: usize,
}

/// A hashed index with separate chaining.
///
/// The number of buckets is fixed when the index is built and the table never grows:
/// chains get longer as elements are added, and lookups cost a scan of one chain.
/// Buckets are created on the first insertion in their slot.
///
/// Entries are allocated in the slab `C`.
///
/// ```
/// use slab_index::{policy::ByKey, HashIndex, Options, ResolveAction};
///
/// let mut index: HashIndex<(&str, u32), ByKey> = HashIndex::with_options(
///     Options::with_policy(ByKey).on_duplicate_keys(ResolveAction::Replace),
/// )
/// .unwrap();
///
/// index.add(("a", 1)).unwrap();
/// index.add(("b", 2)).unwrap();
/// index.add(("a", 3)).unwrap();
///
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.find_key(&"a").map(|c| c.value().1), Some(3));
/// ```
pub struct HashIndex<T, P, C> {
	entries: C,
	buckets: Vec<Option<Bucket>>,
	len: usize,
	policy: P,
	resolve: Resolve,
	t: PhantomData<T>,
}

impl<T, P, C> HashIndex<T, P, C> {
	/// Create an empty index with `DEFAULT_CAPACITY` buckets.
	#[inline]
	pub fn new() -> Self
	where
		C: Default,
		P: Default,
	{
		HashIndex::with_policy(P::default(), DEFAULT_CAPACITY)
	}

	/// Create an empty index with the given policy and number of buckets.
	///
	/// A capacity of `0` is raised to `1`.
	#[inline]
	pub fn with_policy(policy: P, capacity: usize) -> Self
	where
		C: Default,
	{
		HashIndex {
			entries: Default::default(),
			buckets: vec![None; capacity.max(1)],
			len: 0,
			policy,
			resolve: Resolve::default(),
			t: PhantomData,
		}
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of buckets.
	#[inline]
	pub fn capacity(&self) -> usize {
		self.buckets.len()
	}

	#[inline]
	pub fn policy(&self) -> &P {
		&self.policy
	}

	/// Duplicate resolution policy.
	#[inline]
	pub fn resolve_policy(&self) -> Resolve {
		self.resolve
	}
}

impl<T, P, C: Storage<Entry<T>>> HashIndex<T, P, C> {
	#[inline]
	fn entry(&self, id: usize) -> &Entry<T> {
		C::into_ref(self.entries.get(id).unwrap())
	}

	#[inline]
	fn entry_mut(&mut self, id: usize) -> &mut Entry<T> {
		C::into_mut(self.entries.get_mut(id).unwrap())
	}

	#[inline]
	fn try_entry(&self, id: usize) -> Option<&Entry<T>> {
		self.entries.get(id).map(C::into_ref)
	}

	/// First (`Right`) or last (`Left`) entry of the bucket in the given slot.
	#[inline]
	fn bucket_end(&self, slot: usize, dir: Direction) -> Option<usize> {
		self.buckets[slot].and_then(|bucket| match dir {
			Direction::Left => bucket.tail,
			Direction::Right => bucket.head,
		})
	}

	/// Entries of the bucket in the given slot, in insertion order.
	#[inline]
	fn bucket_ids(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
		let mut current = self.bucket_end(slot, Direction::Right);
		std::iter::from_fn(move || {
			let id = current?;
			current = self.entry(id).next;
			Some(id)
		})
	}

	/// First entry in the given direction, starting from the bucket in `slot` included.
	fn scan_buckets(&self, mut slot: usize, dir: Direction) -> Option<usize> {
		loop {
			if let Some(id) = self.bucket_end(slot, dir) {
				return Some(id);
			}

			slot = match dir {
				Direction::Left => slot.checked_sub(1)?,
				Direction::Right if slot + 1 < self.buckets.len() => slot + 1,
				Direction::Right => return None,
			}
		}
	}

	/// First entry in iteration order (slot order, then bucket order).
	#[inline]
	pub(crate) fn first_id(&self) -> Option<usize> {
		self.scan_buckets(0, Direction::Right)
	}

	#[inline]
	pub(crate) fn last_id(&self) -> Option<usize> {
		self.scan_buckets(self.buckets.len() - 1, Direction::Left)
	}

	/// Neighbor of `id` in iteration order, crossing bucket boundaries.
	pub(crate) fn step_all(&self, id: usize, dir: Direction) -> Option<usize> {
		let entry = self.entry(id);
		match entry.neighbor(dir) {
			Some(next) => Some(next),
			None => match dir {
				Direction::Left => self.scan_buckets(entry.bucket.checked_sub(1)?, dir),
				Direction::Right if entry.bucket + 1 < self.buckets.len() => {
					self.scan_buckets(entry.bucket + 1, dir)
				}
				Direction::Right => None,
			},
		}
	}

	/// Returns the element at the given address.
	#[inline]
	pub fn get(&self, addr: Address) -> Option<&T> {
		self.try_entry(addr.id()).map(Entry::item)
	}

	/// Returns a mutable reference to the element at the given address.
	///
	/// The key of the element must not be changed.
	#[inline]
	pub fn get_mut(&mut self, addr: Address) -> Option<&mut T> {
		self.entries
			.get_mut(addr.id())
			.map(|entry| &mut C::into_mut(entry).item)
	}

	/// Returns a cursor on the element at the given address.
	#[inline]
	pub fn cursor(&self, addr: Address) -> Option<Cursor<'_, T, P, C>> {
		self.try_entry(addr.id()).map(|_| Cursor::new(self, addr.id()))
	}

	/// Unlink the entry `id` from its bucket and release it.
	fn unlink(&mut self, id: usize) -> T {
		let entry = self.entries.remove(id).unwrap();

		match entry.prev {
			Some(prev) => self.entry_mut(prev).next = entry.next,
			None => {
				if let Some(bucket) = &mut self.buckets[entry.bucket] {
					bucket.head = entry.next
				}
			}
		}

		match entry.next {
			Some(next) => self.entry_mut(next).prev = entry.prev,
			None => {
				if let Some(bucket) = &mut self.buckets[entry.bucket] {
					bucket.tail = entry.prev
				}
			}
		}

		if let Some(bucket) = &mut self.buckets[entry.bucket] {
			bucket.len -= 1
		}

		self.len -= 1;
		entry.item
	}

	/// Delete the element at the given address and returns it.
	///
	/// Returns `None` if the address does not designate any element.
	/// The emptied bucket, if any, is kept.
	#[inline]
	pub fn delete_at(&mut self, addr: Address) -> Option<T> {
		self.try_entry(addr.id())?;
		Some(self.unlink(addr.id()))
	}

	/// Clears the index, removing all elements and buckets.
	///
	/// The capacity is unchanged.
	#[inline]
	pub fn clear(&mut self) {
		self.entries.clear();
		self.buckets.iter_mut().for_each(|bucket| *bucket = None);
		self.len = 0
	}

	/// Gets an iterator over the elements of the index,
	/// in slot order then insertion order inside each bucket.
	#[inline]
	pub fn iter(&self) -> RangeIter<'_, T, P, C>
	where
		P: HashPolicy<T>,
	{
		self.to_range().iter()
	}

	/// Range over the whole index.
	#[inline]
	pub fn to_range(&self) -> Range<'_, T, P, C>
	where
		P: HashPolicy<T>,
	{
		Range::all(self)
	}
}

impl<T, P: HashPolicy<T>, C: Storage<Entry<T>>> HashIndex<T, P, C> {
	/// Create an index from the given options.
	///
	/// Fails if the initial elements contain duplicates that the resolution policy rejects.
	pub fn with_options(options: Options<T, P>) -> Result<Self, Error>
	where
		C: Default,
	{
		let (elements, policy, resolve, capacity) = options.into_parts();
		let mut index = HashIndex::with_policy(policy, capacity);
		index.resolve = resolve;

		log::debug!(
			"building hashed index with {} buckets from {} elements ({:?})",
			capacity,
			elements.len(),
			resolve
		);

		for element in elements {
			index.add(element)?;
		}

		Ok(index)
	}

	/// Create an index with the default options from the given elements.
	#[inline]
	pub fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Result<Self, Error>
	where
		C: Default,
		P: Default,
	{
		HashIndex::with_options(Options::with_policy(P::default()).elements(elements))
	}

	/// Slot of the bucket for the given key.
	#[inline]
	pub fn slot(&self, key: &P::Key) -> usize {
		(self.policy.hash(key) % self.buckets.len() as u64) as usize
	}

	/// First entry of the bucket in `slot` with the given key.
	#[inline]
	fn find_in(&self, slot: usize, key: &P::Key) -> Option<usize> {
		self.bucket_ids(slot)
			.find(|&id| self.policy.keys_equal(key, self.policy.key(self.entry(id).item())))
	}

	fn find_element(&self, element: &T) -> Option<usize> {
		let key = self.policy.key(element);
		self.bucket_ids(self.slot(key)).find(|&id| {
			let item = self.entry(id).item();
			self.policy.keys_equal(key, self.policy.key(item))
				&& self.policy.elements_equal(element, item)
		})
	}

	/// Append an element to the bucket in `slot`, creating the bucket if needed.
	fn append(&mut self, slot: usize, element: T) -> usize {
		let tail = match self.buckets[slot] {
			Some(bucket) => bucket.tail,
			None => {
				log::trace!("creating bucket {}", slot);
				self.buckets[slot] = Some(Bucket::default());
				None
			}
		};

		let id = self.entries.insert(Entry {
			item: element,
			bucket: slot,
			prev: tail,
			next: None,
		});

		match tail {
			Some(tail) => self.entry_mut(tail).next = Some(id),
			None => {
				if let Some(bucket) = &mut self.buckets[slot] {
					bucket.head = Some(id)
				}
			}
		}

		if let Some(bucket) = &mut self.buckets[slot] {
			bucket.tail = Some(id);
			bucket.len += 1
		}

		self.len += 1;
		id
	}

	/// Insert an element.
	///
	/// If an element with an equal key is already stored,
	/// the duplicate resolution policy decides what happens.
	pub fn add(&mut self, element: T) -> Result<Insertion<T>, Error> {
		let slot = self.slot(self.policy.key(&element));
		let key_match = self.find_in(slot, self.policy.key(&element));

		let resolution = resolve(self.resolve, key_match, || self.find_element(&element))?;

		match resolution {
			Resolution::Proceed => Ok(Insertion::Inserted(Address::new(
				self.append(slot, element),
			))),
			Resolution::Replace(id) => {
				let old = std::mem::replace(&mut self.entry_mut(id).item, element);
				Ok(Insertion::Replaced(Address::new(id), old))
			}
			Resolution::Ignore(id) => Ok(Insertion::Ignored(Address::new(id), element)),
		}
	}

	/// Checks if an element equal to `element` is stored.
	#[inline]
	pub fn has(&self, element: &T) -> bool {
		self.find_element(element).is_some()
	}

	/// Returns a cursor on the stored element equal to `element`.
	#[inline]
	pub fn find(&self, element: &T) -> Option<Cursor<'_, T, P, C>> {
		self.find_element(element).map(|id| Cursor::new(self, id))
	}

	/// Returns a cursor on the first element inserted with the given key.
	#[inline]
	pub fn find_key(&self, key: &P::Key) -> Option<Cursor<'_, T, P, C>> {
		self.find_in(self.slot(key), key).map(|id| Cursor::new(self, id))
	}

	#[inline]
	pub fn has_key(&self, key: &P::Key) -> bool {
		self.find_in(self.slot(key), key).is_some()
	}

	/// Every element with the given key, in insertion order.
	#[inline]
	pub fn equal_keys<'a>(&'a self, key: &'a P::Key) -> Range<'a, T, P, C> {
		Range::key(self, self.slot(key), key)
	}

	/// Delete one element equal to `element`.
	///
	/// Returns `false` if no such element is stored.
	#[inline]
	pub fn delete(&mut self, element: &T) -> bool {
		match self.find_element(element) {
			Some(id) => {
				self.unlink(id);
				true
			}
			None => false,
		}
	}

	/// Delete every element equal to `element`.
	///
	/// Returns the number of deleted elements.
	pub fn delete_all(&mut self, element: &T) -> usize {
		let key = self.policy.key(element);
		let matches: SmallVec<[usize; 4]> = self
			.bucket_ids(self.slot(key))
			.filter(|&id| {
				let item = self.entry(id).item();
				self.policy.keys_equal(key, self.policy.key(item))
					&& self.policy.elements_equal(element, item)
			})
			.collect();

		for &id in &matches {
			self.unlink(id);
		}

		matches.len()
	}

	/// Delete every element with the given key.
	///
	/// Returns the number of deleted elements.
	pub fn delete_key(&mut self, key: &P::Key) -> usize {
		let matches: SmallVec<[usize; 4]> = self
			.bucket_ids(self.slot(key))
			.filter(|&id| self.policy.keys_equal(key, self.policy.key(self.entry(id).item())))
			.collect();

		for &id in &matches {
			self.unlink(id);
		}

		matches.len()
	}

	/// Validate the index.
	///
	/// Checks that every entry sits in the bucket of its key,
	/// the bucket chains and the registered lengths.
	/// Panics if the index is not valid.
	#[cfg(debug_assertions)]
	pub fn validate(&self) {
		let mut count = 0;

		for (slot, bucket) in self.buckets.iter().enumerate() {
			if let Some(bucket) = bucket {
				let mut prev = None;
				let mut bucket_len = 0;

				for id in self.bucket_ids(slot) {
					let entry = self.entry(id);
					if entry.prev != prev {
						panic!("broken chain link at @{} in bucket {}", id, slot)
					}

					if entry.bucket != slot || self.slot(self.policy.key(entry.item())) != slot {
						panic!("entry @{} is not in its bucket ({})", id, slot)
					}

					bucket_len += 1;
					prev = Some(id)
				}

				if bucket.tail != prev {
					panic!("wrong tail in bucket {}", slot)
				}

				if bucket.len != bucket_len {
					panic!(
						"bucket {} registers {} entries but holds {}",
						slot, bucket.len, bucket_len
					)
				}

				count += bucket_len
			}
		}

		if count != self.len {
			panic!(
				"registered length is {} but the index holds {} elements",
				self.len, count
			)
		}
	}
}

impl<T, P: HashPolicy<T>, C: Storage<Entry<T>>> Indexed<T> for HashIndex<T, P, C> {
	type Key = P::Key;
	type Range<'a> = Range<'a, T, P, C> where Self: 'a, T: 'a, P::Key: 'a;
	type Iter<'a> = RangeIter<'a, T, P, C> where Self: 'a, T: 'a;

	#[inline]
	fn len(&self) -> usize {
		self.len
	}

	#[inline]
	fn add(&mut self, element: T) -> Result<Insertion<T>, Error> {
		HashIndex::add(self, element)
	}

	#[inline]
	fn has(&self, element: &T) -> bool {
		HashIndex::has(self, element)
	}

	#[inline]
	fn find_key(&self, key: &P::Key) -> Option<Address> {
		self.find_in(self.slot(key), key).map(Address::new)
	}

	#[inline]
	fn get(&self, addr: Address) -> Option<&T> {
		HashIndex::get(self, addr)
	}

	#[inline]
	fn get_mut(&mut self, addr: Address) -> Option<&mut T> {
		HashIndex::get_mut(self, addr)
	}

	#[inline]
	fn equal_keys<'a>(&'a self, key: &'a P::Key) -> Range<'a, T, P, C> {
		HashIndex::equal_keys(self, key)
	}

	#[inline]
	fn delete(&mut self, element: &T) -> bool {
		HashIndex::delete(self, element)
	}

	#[inline]
	fn delete_all(&mut self, element: &T) -> usize {
		HashIndex::delete_all(self, element)
	}

	#[inline]
	fn delete_key(&mut self, key: &P::Key) -> usize {
		HashIndex::delete_key(self, key)
	}

	#[inline]
	fn delete_at(&mut self, addr: Address) -> Option<T> {
		HashIndex::delete_at(self, addr)
	}

	#[inline]
	fn clear(&mut self) {
		HashIndex::clear(self)
	}

	#[inline]
	fn iter(&self) -> RangeIter<'_, T, P, C> {
		HashIndex::iter(self)
	}
}

impl<T, P: Clone, C: Clone> Clone for HashIndex<T, P, C> {
	#[inline]
	fn clone(&self) -> Self {
		HashIndex {
			entries: self.entries.clone(),
			buckets: self.buckets.clone(),
			len: self.len,
			policy: self.policy.clone(),
			resolve: self.resolve,
			t: PhantomData,
		}
	}
}

impl<T, P: Default, C: Default> Default for HashIndex<T, P, C> {
	#[inline]
	fn default() -> Self {
		HashIndex::new()
	}
}

impl<T: fmt::Debug, P: HashPolicy<T>, C: Storage<Entry<T>>> fmt::Debug for HashIndex<T, P, C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<'a, T, P: HashPolicy<T>, C: Storage<Entry<T>>> IntoIterator for &'a HashIndex<T, P, C> {
	type IntoIter = RangeIter<'a, T, P, C>;
	type Item = &'a T;

	#[inline]
	fn into_iter(self) -> RangeIter<'a, T, P, C> {
		self.iter()
	}
}

impl<T, P: HashPolicy<T>, C: Storage<Entry<T>>> IntoIterator for HashIndex<T, P, C> {
	type IntoIter = IntoIter<T, C>;
	type Item = T;

	#[inline]
	fn into_iter(self) -> IntoIter<T, C> {
		let mut order = Vec::with_capacity(self.len);
		let mut current = self.first_id();
		while let Some(id) = current {
			order.push(id);
			current = self.step_all(id, Direction::Right)
		}

		IntoIter {
			entries: self.entries,
			order: order.into_iter(),
			t: PhantomData,
		}
	}
}

/// Consuming iterator over the elements of a hashed index.
pub struct IntoIter<T, C> {
	entries: C,
	order: std::vec::IntoIter<usize>,
	t: PhantomData<T>,
}

impl<T, C: Storage<Entry<T>>> Iterator for IntoIter<T, C> {
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.order.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		let id = self.order.next()?;
		self.entries.remove(id).map(Entry::into_item)
	}
}

impl<T, C: Storage<Entry<T>>> DoubleEndedIterator for IntoIter<T, C> {
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		let id = self.order.next_back()?;
		self.entries.remove(id).map(Entry::into_item)
	}
}

impl<T, C: Storage<Entry<T>>> ExactSizeIterator for IntoIter<T, C> {}
