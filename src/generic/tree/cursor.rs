use super::{Tree, TreeExt};
use crate::{
	generic::{node::Node, Balancer, Storage},
	policy::Policy,
	Address,
};
use std::{cell::Cell, fmt, iter::FusedIterator};

/// Handle on one element of a search tree.
///
/// Cursors on the same element compare equal, wherever they come from.
pub struct Cursor<'a, T, B, P, C> {
	tree: &'a Tree<T, B, P, C>,
	id: usize,
}

impl<'a, T, B, P, C> Clone for Cursor<'a, T, B, P, C> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, T, B, P, C> Copy for Cursor<'a, T, B, P, C> {}

impl<'a, T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> Cursor<'a, T, B, P, C> {
	#[inline]
	pub(crate) fn new(tree: &'a Tree<T, B, P, C>, id: usize) -> Self {
		Cursor { tree, id }
	}

	/// Address of the element, usable after the cursor is dropped.
	#[inline]
	pub fn address(&self) -> Address {
		Address::new(self.id)
	}

	#[inline]
	pub fn value(&self) -> &'a T {
		self.tree.node(self.id).item()
	}

	#[inline]
	pub fn key(&self) -> &'a P::Key {
		self.tree.policy.key(self.value())
	}

	/// Cursor on the next element in order.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn next(&self) -> Option<Self> {
		self.tree.next_id(self.id).map(|id| Cursor::new(self.tree, id))
	}

	/// Cursor on the previous element in order.
	#[inline]
	pub fn prev(&self) -> Option<Self> {
		self.tree.prev_id(self.id).map(|id| Cursor::new(self.tree, id))
	}
}

impl<'a, T, B, P, C> PartialEq for Cursor<'a, T, B, P, C> {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && std::ptr::eq(self.tree, other.tree)
	}
}

impl<'a, T, B, P, C> Eq for Cursor<'a, T, B, P, C> {}

impl<'a, T: fmt::Debug, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> fmt::Debug
	for Cursor<'a, T, B, P, C>
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}:{:?}", self.address(), self.value())
	}
}

/// Span of consecutive elements of a search tree.
///
/// A range is lazy: nothing is visited until it is iterated, and it can be iterated again as
/// long as the tree is not modified.
pub struct Range<'a, T, B, P, C> {
	tree: &'a Tree<T, B, P, C>,

	/// First and last node of the span, in order.
	bounds: Option<(usize, usize)>,

	/// Number of elements, when known.
	len: Cell<Option<usize>>,

	reversed: bool,
}

impl<'a, T, B, P, C> Clone for Range<'a, T, B, P, C> {
	#[inline]
	fn clone(&self) -> Self {
		Range {
			tree: self.tree,
			bounds: self.bounds,
			len: self.len.clone(),
			reversed: self.reversed,
		}
	}
}

impl<'a, T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> Range<'a, T, B, P, C> {
	#[inline]
	pub(crate) fn new(
		tree: &'a Tree<T, B, P, C>,
		bounds: Option<(usize, usize)>,
		len: Option<usize>,
	) -> Self {
		Range {
			tree,
			bounds,
			len: Cell::new(len),
			reversed: false,
		}
	}

	#[inline]
	pub fn empty(tree: &'a Tree<T, B, P, C>) -> Self {
		Range::new(tree, None, Some(0))
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
	/// Counted on first call if the search did not track it.
	pub fn len(&self) -> usize {
		match self.len.get() {
			Some(len) => len,
			None => {
				let len = self.ids().count();
				self.len.set(Some(len));
				len
			}
		}
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.bounds.is_none()
	}

	/// Cursor on the first element yielded by the range.
	#[inline]
	pub fn first(&self) -> Option<Cursor<'a, T, B, P, C>> {
		self.bounds.map(|(first, last)| {
			Cursor::new(self.tree, if self.reversed { last } else { first })
		})
	}

	/// Cursor on the last element yielded by the range.
	#[inline]
	pub fn last(&self) -> Option<Cursor<'a, T, B, P, C>> {
		self.bounds.map(|(first, last)| {
			Cursor::new(self.tree, if self.reversed { first } else { last })
		})
	}

	/// Node ids of the span, in order, regardless of the direction.
	#[inline]
	pub(crate) fn ids(&self) -> Ids<'a, T, B, P, C> {
		Ids {
			tree: self.tree,
			front: self.bounds.map(|(first, _)| first),
			back: self.bounds.map(|(_, last)| last),
		}
	}

	#[inline]
	pub fn iter(&self) -> RangeIter<'a, T, B, P, C> {
		RangeIter {
			ids: self.ids(),
			len: self.len(),
			reversed: self.reversed,
		}
	}
}

impl<'a, T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> IntoIterator
	for Range<'a, T, B, P, C>
{
	type Item = &'a T;
	type IntoIter = RangeIter<'a, T, B, P, C>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'r, 'a, T, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> IntoIterator
	for &'r Range<'a, T, B, P, C>
{
	type Item = &'a T;
	type IntoIter = RangeIter<'a, T, B, P, C>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl<'a, T: fmt::Debug, B: Balancer, P: Policy<T>, C: Storage<Node<T, B::Tag>>> fmt::Debug
	for Range<'a, T, B, P, C>
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

/// In-order node ids between two bounds.
pub(crate) struct Ids<'a, T, B, P, C> {
	tree: &'a Tree<T, B, P, C>,
	front: Option<usize>,
	back: Option<usize>,
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> Ids<'a, T, B, P, C> {
	#[inline]
	fn finish(&mut self) {
		self.front = None;
		self.back = None
	}
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> Iterator for Ids<'a, T, B, P, C> {
	type Item = usize;

	#[inline]
	fn next(&mut self) -> Option<usize> {
		let id = self.front?;
		if self.back == Some(id) {
			self.finish()
		} else {
			self.front = self.tree.next_id(id)
		}

		Some(id)
	}
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> DoubleEndedIterator
	for Ids<'a, T, B, P, C>
{
	#[inline]
	fn next_back(&mut self) -> Option<usize> {
		let id = self.back?;
		if self.front == Some(id) {
			self.finish()
		} else {
			self.back = self.tree.prev_id(id)
		}

		Some(id)
	}
}

/// Iterator over the elements of a [`Range`].
pub struct RangeIter<'a, T, B, P, C> {
	ids: Ids<'a, T, B, P, C>,

	/// Remaining elements.
	len: usize,

	reversed: bool,
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> RangeIter<'a, T, B, P, C> {
	#[inline]
	fn yielded(&mut self, id: Option<usize>) -> Option<&'a T> {
		let id = id?;
		self.len -= 1;
		Some(self.ids.tree.node(id).item())
	}
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> Iterator for RangeIter<'a, T, B, P, C> {
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		let id = if self.reversed {
			self.ids.next_back()
		} else {
			self.ids.next()
		};

		self.yielded(id)
	}
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> DoubleEndedIterator
	for RangeIter<'a, T, B, P, C>
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		let id = if self.reversed {
			self.ids.next()
		} else {
			self.ids.next_back()
		};

		self.yielded(id)
	}
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> ExactSizeIterator
	for RangeIter<'a, T, B, P, C>
{
}

impl<'a, T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> FusedIterator
	for RangeIter<'a, T, B, P, C>
{
}
