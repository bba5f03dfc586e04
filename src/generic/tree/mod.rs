use crate::{
	generic::{
		balance::{Balancer, EqualKeys, Removal},
		node::{Direction, Node},
		Storage,
	},
	policy::Policy,
	resolve::{resolve, Resolution},
	Address, Error, Indexed, Insertion, Options, Resolve,
};
use std::{fmt, marker::PhantomData};

mod cursor;
mod ext;

pub use cursor::*;
pub use ext::*;

/// Insertion point in a search tree.
///
/// This is the result of a prior search and can be given back to [`Tree::insert_at`] to skip
/// the descent from the root.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Hint {
	/// Node under which the new node is attached, or `None` if the tree is empty.
	pub parent: Option<usize>,

	/// Side of `parent` receiving the new node.
	pub side: Direction,
}

/// A sorted index based on a binary search tree.
///
/// Nodes are allocated in a slab (`C`) and link to each other through their slab identifier.
/// The shape of the tree is maintained by the balancer `B`:
///   - [`Unbalanced`](crate::generic::Unbalanced) never rotates;
///   - [`Avl`](crate::generic::Avl) keeps a balance factor per node;
///   - [`RedBlack`](crate::generic::RedBlack) keeps a color per node.
///
/// Elements are ordered by the key the policy `P` derives from them.
/// Elements sharing a key are allowed when the duplicate resolution policy says so.
/// They are then visited in insertion order.
///
/// # Basic usage
///
/// ```
/// use slab_index::AvlTree;
///
/// let mut tree: AvlTree<i32> = AvlTree::new();
/// for i in [1, 5, 2, 3, 4] {
///     tree.add(i).unwrap();
/// }
///
/// assert!(tree.has(&3));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
///
/// tree.delete(&3);
/// assert!(!tree.has(&3));
/// ```
///
/// # Cursors
///
/// Every element can be addressed through an [`Address`], or navigated from with a [`Cursor`].
///
/// ```
/// use slab_index::{AvlTree, Options, ResolveAction};
///
/// let mut tree: AvlTree<i32> = AvlTree::with_options(
///     Options::new()
///         .elements([1, 2, 3, 3, 3, 4, 5])
///         .on_duplicate_keys(ResolveAction::Insert)
///         .on_duplicate_elements(ResolveAction::Insert),
/// )
/// .unwrap();
///
/// assert_eq!(tree.equal_keys(&3).iter().count(), 3);
///
/// let addr = tree.find_key(&4).unwrap().address();
/// *tree.get_mut(addr).unwrap() = 4; // keys must not change.
/// assert_eq!(tree.cursor(addr).unwrap().prev().map(|c| *c.value()), Some(3));
/// ```
///
/// # Correctness
///
/// It is a logic error for an element to be modified in such a way that its key's ordering
/// relative to any other key changes while it is in the tree.
pub struct Tree<T, B, P, C> {
	/// Allocated nodes.
	nodes: C,

	/// Root node id.
	root: Option<usize>,

	/// Number of items in the tree.
	len: usize,

	policy: P,

	resolve: Resolve,

	t: PhantomData<T>,
	b: PhantomData<B>,
}

impl<T, B, P, C> Tree<T, B, P, C> {
	/// Create a new empty tree.
	#[inline]
	pub fn new() -> Self
	where
		C: Default,
		P: Default,
	{
		Tree::with_policy(P::default())
	}

	/// Create a new empty tree ordered by the given policy.
	#[inline]
	pub fn with_policy(policy: P) -> Self
	where
		C: Default,
	{
		Tree {
			nodes: Default::default(),
			root: None,
			len: 0,
			policy,
			resolve: Resolve::default(),
			t: PhantomData,
			b: PhantomData,
		}
	}

	/// Returns `true` if the tree contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the number of elements in the tree.
	#[inline]
	pub fn len(&self) -> usize {
		self.len
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

impl<T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> Tree<T, B, P, C> {
	/// Create a tree from the given options.
	///
	/// Fails if the initial elements contain duplicates that the resolution policy rejects.
	pub fn with_options(options: Options<T, P>) -> Result<Self, Error>
	where
		C: Default,
	{
		let (elements, policy, resolve, _) = options.into_parts();
		let mut tree = Tree::with_policy(policy);
		tree.resolve = resolve;

		log::debug!(
			"building search tree from {} elements ({:?})",
			elements.len(),
			resolve
		);

		for element in elements {
			tree.add(element)?;
		}

		Ok(tree)
	}

	/// Create a tree with the default options from the given elements.
	#[inline]
	pub fn from_elements<I: IntoIterator<Item = T>>(elements: I) -> Result<Self, Error>
	where
		C: Default,
		P: Default,
	{
		Tree::with_options(Options::with_policy(P::default()).elements(elements))
	}

	#[inline]
	fn key_of(&self, id: usize) -> &P::Key {
		self.policy.key(self.node(id).item())
	}

	/// Returns the element at the given address.
	#[inline]
	pub fn get(&self, addr: Address) -> Option<&T> {
		self.try_node(addr.id()).map(Node::item)
	}

	/// Returns a mutable reference to the element at the given address.
	///
	/// The key of the element must not be changed.
	#[inline]
	pub fn get_mut(&mut self, addr: Address) -> Option<&mut T> {
		self.nodes
			.get_mut(addr.id())
			.map(|node| C::into_mut(node).item_mut())
	}

	/// Returns a cursor on the element at the given address.
	#[inline]
	pub fn cursor(&self, addr: Address) -> Option<Cursor<'_, T, B, P, C>> {
		self.try_node(addr.id()).map(|_| Cursor::new(self, addr.id()))
	}

	/// Cursor on the first element in order.
	#[inline]
	pub fn first(&self) -> Option<Cursor<'_, T, B, P, C>> {
		self.first_id().map(|id| Cursor::new(self, id))
	}

	/// Cursor on the last element in order.
	#[inline]
	pub fn last(&self) -> Option<Cursor<'_, T, B, P, C>> {
		self.last_id().map(|id| Cursor::new(self, id))
	}

	/// Search the insertion point of `key`.
	///
	/// Descends left when `key` is less than the visited key and right otherwise,
	/// so that equal keys cluster to the right of the topmost equal node.
	/// Also returns the topmost node whose key equals `key`, if any.
	pub fn insertion_point(&self, key: &P::Key) -> (Option<usize>, Hint) {
		let mut hint = Hint {
			parent: None,
			side: Direction::Left,
		};
		let mut topmost_match = None;
		let mut current = self.root;

		while let Some(id) = current {
			let node_key = self.key_of(id);
			if topmost_match.is_none() && self.policy.keys_equal(key, node_key) {
				topmost_match = Some(id)
			}

			hint.side = if self.policy.less(key, node_key) {
				Direction::Left
			} else {
				Direction::Right
			};
			hint.parent = Some(id);
			current = self.node(id).child(hint.side);
		}

		(topmost_match, hint)
	}

	/// Attach a new node holding `element` at the given insertion point, without any check.
	///
	/// The hint must come from [`Self::insertion_point`] and the tree must not have been
	/// modified since.
	pub fn insert_at(&mut self, hint: Hint, element: T) -> Address {
		let id = self.allocate_node(Node::new(hint.parent, element, B::tag()));

		match hint.parent {
			Some(parent) => {
				debug_assert!(self.node(parent).child(hint.side).is_none());
				self.node_mut(parent).set_child(hint.side, Some(id))
			}
			None => self.set_root_id(Some(id)),
		}

		self.set_len(self.len + 1);
		B::inserted(self, id);
		Address::new(id)
	}

	/// Insert an element.
	///
	/// If an element with an equal key is already stored,
	/// the duplicate resolution policy decides what happens.
	pub fn add(&mut self, element: T) -> Result<Insertion<T>, Error> {
		let (topmost_match, hint) = self.insertion_point(self.policy.key(&element));

		let resolution = resolve(self.resolve, topmost_match, || {
			self.find_element(&element)
		})?;

		match resolution {
			Resolution::Proceed => Ok(Insertion::Inserted(self.insert_at(hint, element))),
			Resolution::Replace(id) => {
				let old = std::mem::replace(self.node_mut(id).item_mut(), element);
				Ok(Insertion::Replaced(Address::new(id), old))
			}
			Resolution::Ignore(id) => Ok(Insertion::Ignored(Address::new(id), element)),
		}
	}

	/// Find the topmost node with the given key.
	fn topmost(&self, key: &P::Key) -> Option<usize> {
		let mut current = self.root;

		while let Some(id) = current {
			let node_key = self.key_of(id);
			if self.policy.keys_equal(key, node_key) {
				return Some(id);
			}

			current = if self.policy.less(key, node_key) {
				self.node(id).left()
			} else {
				self.node(id).right()
			}
		}

		None
	}

	/// Find the first (`Left`) or last (`Right`) node in order with the given key.
	///
	/// Keeps descending past matches toward `dir`,
	/// so this does not rely on equal keys being clustered.
	fn outermost(&self, key: &P::Key, dir: Direction) -> Option<usize> {
		let mut best = None;
		let mut current = self.root;

		while let Some(id) = current {
			let node_key = self.key_of(id);
			current = if self.policy.keys_equal(key, node_key) {
				best = Some(id);
				self.node(id).child(dir)
			} else if self.policy.less(key, node_key) {
				self.node(id).left()
			} else {
				self.node(id).right()
			}
		}

		best
	}

	/// Find the node storing an element equal to `element`.
	fn find_element(&self, element: &T) -> Option<usize> {
		self.equal_keys(self.policy.key(element))
			.ids()
			.find(|&id| self.policy.elements_equal(element, self.node(id).item()))
	}

	/// Returns a cursor on the topmost element with the given key.
	#[inline]
	pub fn find_key(&self, key: &P::Key) -> Option<Cursor<'_, T, B, P, C>> {
		self.topmost(key).map(|id| Cursor::new(self, id))
	}

	#[inline]
	pub fn has_key(&self, key: &P::Key) -> bool {
		self.topmost(key).is_some()
	}

	/// Checks if an element equal to `element` is stored.
	#[inline]
	pub fn has(&self, element: &T) -> bool {
		self.find_element(element).is_some()
	}

	/// Returns a cursor on the stored element equal to `element`.
	#[inline]
	pub fn find(&self, element: &T) -> Option<Cursor<'_, T, B, P, C>> {
		self.find_element(element).map(|id| Cursor::new(self, id))
	}

	/// Range of every element with the given key, in order.
	///
	/// The search strategy depends on the balancer (see [`EqualKeys`]).
	pub fn equal_keys(&self, key: &P::Key) -> Range<'_, T, B, P, C> {
		match B::EQUAL_KEYS {
			EqualKeys::Strict => match self.topmost(key) {
				Some(first) => {
					let mut last = first;
					let mut len = 1;
					while let Some(next) = self.next_id(last) {
						if self.policy.keys_equal(key, self.key_of(next)) {
							last = next;
							len += 1
						} else {
							break;
						}
					}

					Range::new(self, Some((first, last)), Some(len))
				}
				None => Range::empty(self),
			},
			EqualKeys::NonStrict => {
				match (
					self.outermost(key, Direction::Left),
					self.outermost(key, Direction::Right),
				) {
					(Some(first), Some(last)) => Range::new(self, Some((first, last)), None),
					_ => Range::empty(self),
				}
			}
		}
	}

	/// Greatest lower bound: cursor on the last element whose key is less or equal to `key`.
	pub fn floor(&self, key: &P::Key) -> Option<Cursor<'_, T, B, P, C>> {
		let mut current = self.nearest(key, Direction::Right)?;

		if self.policy.less(key, self.key_of(current)) {
			loop {
				current = self.prev_id(current)?;
				if !self.policy.less(key, self.key_of(current)) {
					break;
				}
			}
		} else {
			while let Some(next) = self.next_id(current) {
				if self.policy.less(key, self.key_of(next)) {
					break;
				}

				current = next
			}
		}

		Some(Cursor::new(self, current))
	}

	/// Least upper bound: cursor on the first element whose key is greater or equal to `key`.
	pub fn ceiling(&self, key: &P::Key) -> Option<Cursor<'_, T, B, P, C>> {
		let mut current = self.nearest(key, Direction::Left)?;

		if self.policy.less(self.key_of(current), key) {
			loop {
				current = self.next_id(current)?;
				if !self.policy.less(self.key_of(current), key) {
					break;
				}
			}
		} else {
			while let Some(prev) = self.prev_id(current) {
				if self.policy.less(self.key_of(prev), key) {
					break;
				}

				current = prev
			}
		}

		Some(Cursor::new(self, current))
	}

	/// Descend toward `key` and return the last visited node.
	///
	/// Equal keys are passed toward `on_equal`.
	fn nearest(&self, key: &P::Key, on_equal: Direction) -> Option<usize> {
		let mut id = self.root?;

		loop {
			let node_key = self.key_of(id);
			let dir = if self.policy.less(key, node_key) {
				Direction::Left
			} else if self.policy.less(node_key, key) {
				Direction::Right
			} else {
				on_equal
			};

			match self.node(id).child(dir) {
				Some(child) => id = child,
				None => return Some(id),
			}
		}
	}

	/// Range over the whole tree.
	#[inline]
	pub fn to_range(&self) -> Range<'_, T, B, P, C> {
		match (self.first_id(), self.last_id()) {
			(Some(first), Some(last)) => Range::new(self, Some((first, last)), Some(self.len)),
			_ => Range::empty(self),
		}
	}

	/// Gets an iterator over the elements of the tree, in order.
	#[inline]
	pub fn iter(&self) -> RangeIter<'_, T, B, P, C> {
		self.to_range().iter()
	}

	/// Delete the element at the given address and returns it.
	///
	/// Returns `None` if the address does not designate any element.
	///
	/// If the node has two children,
	/// its in-order successor's element is moved into it and the successor's node is released:
	/// `addr` then designates the successor element and the successor's address becomes invalid.
	pub fn delete_at(&mut self, addr: Address) -> Option<T> {
		let id = addr.id();
		let node = self.try_node(id)?;

		match (node.left(), node.right()) {
			(Some(_), Some(right)) => {
				let successor = self.extremum(right, Direction::Left);
				let successor_item = self.splice_out(successor);
				Some(std::mem::replace(
					self.node_mut(id).item_mut(),
					successor_item,
				))
			}
			_ => Some(self.splice_out(id)),
		}
	}

	/// Remove a node with at most one child from the tree and release it.
	fn splice_out(&mut self, id: usize) -> T {
		let node = self.node(id);
		debug_assert!(node.left().is_none() || node.right().is_none());

		let parent = node.parent();
		let replacement = node.left().or_else(|| node.right());
		let side = self.side_in_parent(id).unwrap_or(Direction::Left);

		self.replace_child(parent, id, replacement);
		let (item, tag) = self.release_node(id).into_parts();
		self.set_len(self.len - 1);

		B::removed(
			self,
			Removal {
				tag,
				replacement,
				parent,
				side,
			},
		);

		item
	}

	/// Delete one element equal to `element`.
	///
	/// Returns `false` if no such element is stored.
	#[inline]
	pub fn delete(&mut self, element: &T) -> bool {
		match self.find_element(element) {
			Some(id) => {
				self.delete_at(Address::new(id));
				true
			}
			None => false,
		}
	}

	/// Delete every element equal to `element`.
	///
	/// Returns the number of deleted elements.
	pub fn delete_all(&mut self, element: &T) -> usize {
		let mut count = 0;
		while let Some(id) = self.find_element(element) {
			self.delete_at(Address::new(id));
			count += 1
		}

		count
	}

	/// Delete every element with the given key.
	///
	/// Returns the number of deleted elements.
	pub fn delete_key(&mut self, key: &P::Key) -> usize {
		let mut count = 0;
		while let Some(id) = self.topmost(key) {
			self.delete_at(Address::new(id));
			count += 1
		}

		count
	}

	/// Clears the tree, removing all elements.
	#[inline]
	pub fn clear(&mut self) {
		self.set_root_id(None);
		self.set_len(0);
		self.nodes.clear()
	}

	/// Validate the tree.
	///
	/// Checks the parent links, the ordering of the elements, the registered length
	/// and the balancer invariants.
	/// Panics if the tree is not valid.
	#[cfg(debug_assertions)]
	pub fn validate(&self) {
		if let Some(root) = self.root {
			if self.node(root).parent().is_some() {
				panic!("root has a parent")
			}
		}

		let mut count = 0;
		let mut previous: Option<usize> = None;
		let mut current = self.first_id();
		while let Some(id) = current {
			for child in self.node(id).children() {
				if self.node(child).parent() != Some(id) {
					panic!("broken parent link @{} -> @{}", child, id)
				}
			}

			if let Some(previous) = previous {
				if self.policy.less(self.key_of(id), self.key_of(previous)) {
					panic!("elements are not sorted (@{} before @{})", previous, id)
				}
			}

			count += 1;
			previous = Some(id);
			current = self.next_id(id);
		}

		if count != self.len {
			panic!(
				"registered length is {} but the tree holds {} elements",
				self.len, count
			)
		}

		B::validate(self)
	}

	/// Write the tree in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		T: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		let mut stack: smallvec::SmallVec<[usize; 32]> = self.root.into_iter().collect();
		while let Some(id) = stack.pop() {
			let node = self.node(id);
			write!(f, "\tn{} [label=\"", id)?;
			node.dot_write_label(f)?;
			writeln!(f, "|(@{})\"];", id)?;

			for child in node.children() {
				writeln!(f, "\tn{} -> n{}", id, child)?;
				stack.push(child)
			}
		}

		write!(f, "}}")
	}
}

impl<T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> Indexed<T> for Tree<T, B, P, C> {
	type Key = P::Key;
	type Range<'a> = Range<'a, T, B, P, C> where Self: 'a, T: 'a, P::Key: 'a;
	type Iter<'a> = RangeIter<'a, T, B, P, C> where Self: 'a, T: 'a;

	#[inline]
	fn len(&self) -> usize {
		self.len
	}

	#[inline]
	fn add(&mut self, element: T) -> Result<Insertion<T>, Error> {
		Tree::add(self, element)
	}

	#[inline]
	fn has(&self, element: &T) -> bool {
		Tree::has(self, element)
	}

	#[inline]
	fn find_key(&self, key: &P::Key) -> Option<Address> {
		self.topmost(key).map(Address::new)
	}

	#[inline]
	fn get(&self, addr: Address) -> Option<&T> {
		Tree::get(self, addr)
	}

	#[inline]
	fn get_mut(&mut self, addr: Address) -> Option<&mut T> {
		Tree::get_mut(self, addr)
	}

	#[inline]
	fn equal_keys<'a>(&'a self, key: &'a P::Key) -> Range<'a, T, B, P, C> {
		Tree::equal_keys(self, key)
	}

	#[inline]
	fn delete(&mut self, element: &T) -> bool {
		Tree::delete(self, element)
	}

	#[inline]
	fn delete_all(&mut self, element: &T) -> usize {
		Tree::delete_all(self, element)
	}

	#[inline]
	fn delete_key(&mut self, key: &P::Key) -> usize {
		Tree::delete_key(self, key)
	}

	#[inline]
	fn delete_at(&mut self, addr: Address) -> Option<T> {
		Tree::delete_at(self, addr)
	}

	#[inline]
	fn clear(&mut self) {
		Tree::clear(self)
	}

	#[inline]
	fn iter(&self) -> RangeIter<'_, T, B, P, C> {
		Tree::iter(self)
	}
}

impl<T, B, P: Clone, C: Clone> Clone for Tree<T, B, P, C> {
	#[inline]
	fn clone(&self) -> Self {
		Tree {
			nodes: self.nodes.clone(),
			root: self.root,
			len: self.len,
			policy: self.policy.clone(),
			resolve: self.resolve,
			t: PhantomData,
			b: PhantomData,
		}
	}
}

impl<T, B, P: Default, C: Default> Default for Tree<T, B, P, C> {
	#[inline]
	fn default() -> Self {
		Tree::new()
	}
}

impl<T: fmt::Debug, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> fmt::Debug
	for Tree<T, B, P, C>
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

impl<'a, T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> IntoIterator
	for &'a Tree<T, B, P, C>
{
	type IntoIter = RangeIter<'a, T, B, P, C>;
	type Item = &'a T;

	#[inline]
	fn into_iter(self) -> RangeIter<'a, T, B, P, C> {
		self.iter()
	}
}

impl<T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> IntoIterator
	for Tree<T, B, P, C>
{
	type IntoIter = IntoIter<T, B::Tag, C>;
	type Item = T;

	#[inline]
	fn into_iter(self) -> IntoIter<T, B::Tag, C> {
		let order: Vec<usize> = self.to_range().ids().collect();
		IntoIter {
			nodes: self.nodes,
			order: order.into_iter(),
			tag: PhantomData,
		}
	}
}

/// Consuming iterator over the elements of a tree, in order.
pub struct IntoIter<T, G, C> {
	nodes: C,
	order: std::vec::IntoIter<usize>,
	tag: PhantomData<Node<T, G>>,
}

impl<T, G, C: Storage<Node<T, G>>> Iterator for IntoIter<T, G, C> {
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.order.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		let id = self.order.next()?;
		self.nodes.remove(id).map(Node::into_item)
	}
}

impl<T, G, C: Storage<Node<T, G>>> DoubleEndedIterator for IntoIter<T, G, C> {
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		let id = self.order.next_back()?;
		self.nodes.remove(id).map(Node::into_item)
	}
}

impl<T, G, C: Storage<Node<T, G>>> ExactSizeIterator for IntoIter<T, G, C> {}
