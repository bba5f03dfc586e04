use crate::generic::{
	node::{Direction, Node},
	tree::Tree,
	Balancer, Storage,
};

/// Extension methods.
///
/// This trait can be imported to access the internal methods of the search tree.
/// These methods are not intended to be directly called by users, but can be used to
/// extend the data structure with new functionalities, such as new balancers.
pub trait TreeExt<T, G> {
	/// Get the root node id.
	///
	/// Returns `None` if the tree is empty.
	fn root_id(&self) -> Option<usize>;

	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is out of bounds.
	fn node(&self, id: usize) -> &Node<T, G>;

	/// Get the node associated to the given `id`, if any.
	fn try_node(&self, id: usize) -> Option<&Node<T, G>>;

	/// Descend from `id` always following `dir` and returns the last node reached.
	fn extremum(&self, id: usize, dir: Direction) -> usize;

	/// Get the first node id in order, if any.
	#[inline]
	fn first_id(&self) -> Option<usize> {
		self.root_id().map(|id| self.extremum(id, Direction::Left))
	}

	/// Get the last node id in order, if any.
	#[inline]
	fn last_id(&self) -> Option<usize> {
		self.root_id().map(|id| self.extremum(id, Direction::Right))
	}

	/// Get the in-order neighbor of `id` in the given direction.
	///
	/// ```text
	///               ┌───┐
	///               │ 4 │
	///               └───┘
	///              /     \
	///         ┌───┐       ┌───┐
	///         │ 2 │       │ 6 │
	///         └───┘       └───┘
	///        /     \
	///   ┌───┐       ┌───┐
	///   │ 1 │       │ 3 │  next of 3 is 4: climb while coming from the right.
	///   └───┘       └───┘
	/// ```
	fn step(&self, id: usize, dir: Direction) -> Option<usize>;

	#[inline]
	fn next_id(&self, id: usize) -> Option<usize> {
		self.step(id, Direction::Right)
	}

	#[inline]
	fn prev_id(&self, id: usize) -> Option<usize> {
		self.step(id, Direction::Left)
	}

	/// Side of `id` in its parent, or `None` for the root.
	#[inline]
	fn side_in_parent(&self, id: usize) -> Option<Direction> {
		self.node(id)
			.parent()
			.map(|parent| self.node(parent).side_of(id).unwrap())
	}
}

pub trait TreeExtMut<T, G>: TreeExt<T, G> {
	/// Set the new known number of items in the tree.
	fn set_len(&mut self, len: usize);

	fn set_root_id(&mut self, id: Option<usize>);

	/// Get the node associated to the given `id` mutabily.
	///
	/// Panics if `id` is out of bounds.
	fn node_mut(&mut self, id: usize) -> &mut Node<T, G>;

	/// Allocate a free identifier for the given node.
	fn allocate_node(&mut self, node: Node<T, G>) -> usize;

	/// Release the given node identifier and return the node it used to identify.
	fn release_node(&mut self, id: usize) -> Node<T, G>;

	/// Put `new` in place of the child `old` of `parent` (or of the root if `parent` is `None`).
	///
	/// The parent of `new` is updated. `old` is left untouched.
	fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>);

	/// Rotate the subtree rooted in `id` so that `id` moves down in the direction `dir`.
	///
	/// Returns the id of the new subtree root (the former `dir.opposite()` child of `id`).
	/// Panics if there is no such child.
	///
	/// ```text
	///        id                       pivot
	///       /  \      rotate(id,     /     \
	///      a   pivot     Left)     id       c
	///          /   \      ==>     /  \
	///         b     c            a    b
	/// ```
	fn rotate(&mut self, id: usize, dir: Direction) -> usize;
}

impl<T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> TreeExt<T, B::Tag> for Tree<T, B, P, C> {
	#[inline]
	fn root_id(&self) -> Option<usize> {
		self.root
	}

	#[inline]
	fn node(&self, id: usize) -> &Node<T, B::Tag> {
		C::into_ref(self.nodes.get(id).unwrap())
	}

	#[inline]
	fn try_node(&self, id: usize) -> Option<&Node<T, B::Tag>> {
		self.nodes.get(id).map(C::into_ref)
	}

	#[inline]
	fn extremum(&self, mut id: usize, dir: Direction) -> usize {
		while let Some(child) = self.node(id).child(dir) {
			id = child
		}

		id
	}

	fn step(&self, id: usize, dir: Direction) -> Option<usize> {
		match self.node(id).child(dir) {
			Some(child) => Some(self.extremum(child, dir.opposite())),
			None => {
				let mut current = id;
				loop {
					let parent = self.node(current).parent()?;
					if self.node(parent).child(dir.opposite()) == Some(current) {
						return Some(parent);
					}

					current = parent
				}
			}
		}
	}
}

impl<T, B: Balancer, P, C: Storage<Node<T, B::Tag>>> TreeExtMut<T, B::Tag> for Tree<T, B, P, C> {
	#[inline]
	fn set_len(&mut self, new_len: usize) {
		self.len = new_len
	}

	#[inline]
	fn set_root_id(&mut self, id: Option<usize>) {
		self.root = id
	}

	#[inline]
	fn node_mut(&mut self, id: usize) -> &mut Node<T, B::Tag> {
		C::into_mut(self.nodes.get_mut(id).unwrap())
	}

	#[inline]
	fn allocate_node(&mut self, node: Node<T, B::Tag>) -> usize {
		self.nodes.insert(node)
	}

	#[inline]
	fn release_node(&mut self, id: usize) -> Node<T, B::Tag> {
		self.nodes.remove(id).unwrap()
	}

	#[inline]
	fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
		match parent {
			Some(parent) => {
				let side = self.node(parent).side_of(old).unwrap();
				self.node_mut(parent).set_child(side, new)
			}
			None => self.set_root_id(new),
		}

		if let Some(new) = new {
			self.node_mut(new).set_parent(parent)
		}
	}

	fn rotate(&mut self, id: usize, dir: Direction) -> usize {
		let pivot = self.node(id).child(dir.opposite()).unwrap();
		let inner = self.node(pivot).child(dir);
		let parent = self.node(id).parent();

		self.node_mut(id).set_child(dir.opposite(), inner);
		if let Some(inner) = inner {
			self.node_mut(inner).set_parent(Some(id))
		}

		self.replace_child(parent, id, Some(pivot));
		self.node_mut(pivot).set_child(dir, Some(id));
		self.node_mut(id).set_parent(Some(pivot));

		log::trace!("rotated {:?} at @{} (new subtree root @{})", dir, id, pivot);
		pivot
	}
}
