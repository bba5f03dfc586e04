use std::ops::{Index, IndexMut};

/// Side of a child in its parent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
	Left,
	Right,
}

impl Direction {
	#[inline]
	pub fn opposite(self) -> Direction {
		match self {
			Direction::Left => Direction::Right,
			Direction::Right => Direction::Left,
		}
	}

	/// `-1` for left, `1` for right.
	#[inline]
	pub fn sign(self) -> i8 {
		match self {
			Direction::Left => -1,
			Direction::Right => 1,
		}
	}
}

/// Binary search tree node.
///
/// Nodes are stored in a slab and refer to each other through their slab identifier.
/// The `tag` holds the balancer state of the node
/// (a balance factor for AVL trees, a color for Red-Black trees).
#[derive(Clone, Debug)]
pub struct Node<T, G> {
	item: T,
	parent: Option<usize>,
	children: Children,
	tag: G,
}

/// Left and right children of a node.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Children([Option<usize>; 2]);

impl Index<Direction> for Children {
	type Output = Option<usize>;

	#[inline]
	fn index(&self, dir: Direction) -> &Option<usize> {
		match dir {
			Direction::Left => &self.0[0],
			Direction::Right => &self.0[1],
		}
	}
}

impl IndexMut<Direction> for Children {
	#[inline]
	fn index_mut(&mut self, dir: Direction) -> &mut Option<usize> {
		match dir {
			Direction::Left => &mut self.0[0],
			Direction::Right => &mut self.0[1],
		}
	}
}

impl<T, G> Node<T, G> {
	#[inline]
	pub fn new(parent: Option<usize>, item: T, tag: G) -> Node<T, G> {
		Node {
			item,
			parent,
			children: Children::default(),
			tag,
		}
	}

	#[inline]
	pub fn item(&self) -> &T {
		&self.item
	}

	#[inline]
	pub fn item_mut(&mut self) -> &mut T {
		&mut self.item
	}

	#[inline]
	pub fn into_item(self) -> T {
		self.item
	}

	#[inline]
	pub fn into_parts(self) -> (T, G) {
		(self.item, self.tag)
	}

	#[inline]
	pub fn parent(&self) -> Option<usize> {
		self.parent
	}

	#[inline]
	pub fn set_parent(&mut self, parent: Option<usize>) {
		self.parent = parent
	}

	#[inline]
	pub fn child(&self, dir: Direction) -> Option<usize> {
		self.children[dir]
	}

	#[inline]
	pub fn set_child(&mut self, dir: Direction, child: Option<usize>) {
		self.children[dir] = child
	}

	#[inline]
	pub fn left(&self) -> Option<usize> {
		self.children[Direction::Left]
	}

	#[inline]
	pub fn right(&self) -> Option<usize> {
		self.children[Direction::Right]
	}

	#[inline]
	pub fn children(&self) -> impl Iterator<Item = usize> {
		let children = self.children;
		[Direction::Left, Direction::Right]
			.into_iter()
			.filter_map(move |dir| children[dir])
	}

	/// Side of the given child, or `None` if `id` is not a child of this node.
	#[inline]
	pub fn side_of(&self, id: usize) -> Option<Direction> {
		if self.left() == Some(id) {
			Some(Direction::Left)
		} else if self.right() == Some(id) {
			Some(Direction::Right)
		} else {
			None
		}
	}

	#[inline]
	pub fn tag(&self) -> &G {
		&self.tag
	}

	#[inline]
	pub fn set_tag(&mut self, tag: G) {
		self.tag = tag
	}

	/// Write the label of the node in the DOT format.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		T: std::fmt::Display,
		G: std::fmt::Debug,
	{
		write!(f, "{}|{:?}", self.item, self.tag)
	}
}
