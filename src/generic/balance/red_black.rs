//! Red-Black balancing.
use super::{Balancer, EqualKeys, Removal};
use crate::generic::{
	node::Node,
	tree::{Tree, TreeExt, TreeExtMut},
	Storage,
};

/// Red-Black trees.
///
/// Invariants:
///   - the root is black;
///   - a red node has no red child;
///   - every path from a node down to a missing child crosses the same number of black nodes.
#[derive(Clone, Copy, Debug)]
pub struct RedBlack;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
	Red,
	Black,
}

/// Color of a node. Missing nodes are black.
#[inline]
fn color<T, P, C: Storage<Node<T, Color>>>(tree: &Tree<T, RedBlack, P, C>, id: Option<usize>) -> Color {
	match id {
		Some(id) => *tree.node(id).tag(),
		None => Color::Black,
	}
}

#[inline]
fn paint<T, P, C: Storage<Node<T, Color>>>(tree: &mut Tree<T, RedBlack, P, C>, id: usize, c: Color) {
	tree.node_mut(id).set_tag(c)
}

impl Balancer for RedBlack {
	type Tag = Color;

	const EQUAL_KEYS: EqualKeys = EqualKeys::NonStrict;

	#[inline]
	fn tag() -> Color {
		Color::Red
	}

	fn inserted<T, P, C: Storage<Node<T, Color>>>(tree: &mut Tree<T, Self, P, C>, id: usize) {
		let mut x = id;
		loop {
			let parent = match tree.node(x).parent() {
				Some(parent) => parent,
				None => {
					paint(tree, x, Color::Black);
					return;
				}
			};

			if color(tree, Some(parent)) == Color::Black {
				return;
			}

			let grand_parent = match tree.node(parent).parent() {
				Some(g) => g,
				None => {
					paint(tree, parent, Color::Black);
					return;
				}
			};

			let parent_side = tree.node(grand_parent).side_of(parent).unwrap();
			let uncle = tree.node(grand_parent).child(parent_side.opposite());

			if color(tree, uncle) == Color::Red {
				log::trace!("recoloring around @{}", grand_parent);
				paint(tree, parent, Color::Black);
				paint(tree, uncle.unwrap(), Color::Black);
				paint(tree, grand_parent, Color::Red);
				x = grand_parent;
				continue;
			}

			let mut parent = parent;
			if tree.node(parent).side_of(x) == Some(parent_side.opposite()) {
				// inner child: bring it on the outside.
				tree.rotate(parent, parent_side);
				parent = x
			}

			paint(tree, parent, Color::Black);
			paint(tree, grand_parent, Color::Red);
			tree.rotate(grand_parent, parent_side.opposite());
			return;
		}
	}

	fn removed<T, P, C: Storage<Node<T, Color>>>(
		tree: &mut Tree<T, Self, P, C>,
		removal: Removal<Color>,
	) {
		if removal.tag == Color::Red {
			return;
		}

		// `x` carries an extra black.
		let mut x = removal.replacement;
		let mut parent = removal.parent;
		let mut side = removal.side;

		loop {
			if let Some(id) = x {
				if color(tree, x) == Color::Red {
					paint(tree, id, Color::Black);
					return;
				}
			}

			let p = match parent {
				Some(p) => p,
				None => return,
			};

			let sibling = match tree.node(p).child(side.opposite()) {
				Some(sibling) => sibling,
				None => {
					x = Some(p);
					parent = tree.node(p).parent();
					side = tree.side_in_parent(p).unwrap_or(side);
					continue;
				}
			};

			if color(tree, Some(sibling)) == Color::Red {
				paint(tree, sibling, Color::Black);
				paint(tree, p, Color::Red);
				tree.rotate(p, side);
				continue;
			}

			let near = tree.node(sibling).child(side);
			let far = tree.node(sibling).child(side.opposite());

			if color(tree, near) == Color::Black && color(tree, far) == Color::Black {
				log::trace!("pushing extra black up from @{}", p);
				paint(tree, sibling, Color::Red);
				x = Some(p);
				parent = tree.node(p).parent();
				side = tree.side_in_parent(p).unwrap_or(side);
				continue;
			}

			let (sibling, far) = if color(tree, far) == Color::Black {
				let near = near.unwrap();
				paint(tree, near, Color::Black);
				paint(tree, sibling, Color::Red);
				tree.rotate(sibling, side.opposite());
				(near, Some(sibling))
			} else {
				(sibling, far)
			};

			let parent_color = color(tree, Some(p));
			paint(tree, sibling, parent_color);
			paint(tree, p, Color::Black);
			if let Some(far) = far {
				paint(tree, far, Color::Black)
			}

			tree.rotate(p, side);
			return;
		}
	}

	#[cfg(debug_assertions)]
	fn validate<T, P, C: Storage<Node<T, Color>>>(tree: &Tree<T, Self, P, C>) {
		fn black_height<T, P, C: Storage<Node<T, Color>>>(
			tree: &Tree<T, RedBlack, P, C>,
			id: Option<usize>,
		) -> usize {
			match id {
				Some(id) => {
					let node = tree.node(id);
					if *node.tag() == Color::Red
						&& node.children().any(|child| *tree.node(child).tag() == Color::Red)
					{
						panic!("red node @{} has a red child", id)
					}

					let left = black_height(tree, node.left());
					let right = black_height(tree, node.right());
					if left != right {
						panic!(
							"black height mismatch under @{} ({} on the left, {} on the right)",
							id, left, right
						)
					}

					match node.tag() {
						Color::Black => left + 1,
						Color::Red => left,
					}
				}
				None => 1,
			}
		}

		if color(tree, tree.root_id()) == Color::Red {
			panic!("red root")
		}

		black_height(tree, tree.root_id());
	}
}
