use crate::{policy::Natural, Resolve, ResolveAction};

/// Number of buckets of a hashed index when none is configured.
pub const DEFAULT_CAPACITY: usize = 64;

/// Construction options of an index.
///
/// Options are fixed for the whole lifetime of the index.
///
/// # Example
///
/// ```
/// use slab_index::{HashIndex, Options, ResolveAction};
///
/// let index: HashIndex<u32> = HashIndex::with_options(
///     Options::new()
///         .elements([1, 2, 3, 3])
///         .on_duplicate_keys(ResolveAction::Ignore)
///         .capacity(16),
/// )
/// .unwrap();
///
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.capacity(), 16);
/// ```
#[derive(Clone, Debug)]
pub struct Options<T, P = Natural> {
	elements: Vec<T>,
	policy: P,
	resolve: Resolve,
	capacity: usize,
}

impl<T> Options<T> {
	/// Default options: no initial element, natural policy,
	/// duplicates rejected and `DEFAULT_CAPACITY` buckets.
	#[inline]
	pub fn new() -> Self {
		Options::with_policy(Natural)
	}
}

impl<T> Default for Options<T> {
	#[inline]
	fn default() -> Self {
		Options::new()
	}
}

impl<T, P> Options<T, P> {
	#[inline]
	pub fn with_policy(policy: P) -> Self {
		Options {
			elements: Vec::new(),
			policy,
			resolve: Resolve::default(),
			capacity: DEFAULT_CAPACITY,
		}
	}

	/// Replace the policy.
	#[inline]
	pub fn policy<Q>(self, policy: Q) -> Options<T, Q> {
		Options {
			elements: self.elements,
			policy,
			resolve: self.resolve,
			capacity: self.capacity,
		}
	}

	/// Add initial elements.
	///
	/// They are inserted in order and go through duplicate resolution.
	#[inline]
	pub fn elements<I: IntoIterator<Item = T>>(mut self, elements: I) -> Self {
		self.elements.extend(elements);
		self
	}

	#[inline]
	pub fn on_duplicate_keys(mut self, action: ResolveAction) -> Self {
		self.resolve.keys = action;
		self
	}

	#[inline]
	pub fn on_duplicate_elements(mut self, action: ResolveAction) -> Self {
		self.resolve.elements = action;
		self
	}

	#[inline]
	pub fn resolve(mut self, resolve: Resolve) -> Self {
		self.resolve = resolve;
		self
	}

	/// Number of buckets of a hashed index.
	///
	/// Ignored by search trees. A capacity of `0` is raised to `1`.
	#[inline]
	pub fn capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity;
		self
	}

	#[inline]
	pub(crate) fn into_parts(self) -> (Vec<T>, P, Resolve, usize) {
		(self.elements, self.policy, self.resolve, self.capacity.max(1))
	}
}
