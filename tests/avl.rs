use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use slab_index::{
	generic::{tree::TreeExt, Direction},
	AvlTree, Options, Resolve,
};
use std::collections::BTreeSet;

const SEED: &[u8; 32] = b"testseedtestseedtestseedtestseed";

fn items(rng: &mut SmallRng, n: usize) -> Vec<u32> {
	let mut items: Vec<u32> = (0..n as u32).collect();
	items.shuffle(rng);
	items
}

#[test]
pub fn insert_sorted() {
	let mut tree: AvlTree<i32> = AvlTree::new();
	for i in [1, 5, 2, 3, 4] {
		assert!(tree.add(i).unwrap().is_new());
		tree.validate();
	}

	assert_eq!(tree.len(), 5);
	assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
}

#[test]
pub fn insert_ascending() {
	let mut tree: AvlTree<u32> = AvlTree::new();
	for i in 0..1000 {
		tree.add(i).unwrap();
		tree.validate();
	}

	// a perfectly balanced tree of 1023 nodes has height 10.
	fn height(tree: &AvlTree<u32>, id: Option<usize>) -> usize {
		match id {
			Some(id) => {
				let node = tree.node(id);
				1 + height(tree, node.left()).max(height(tree, node.right()))
			}
			None => 0,
		}
	}

	assert!(height(&tree, tree.root_id()) <= 14);
}

#[test]
pub fn delete_sequence() {
	let mut tree: AvlTree<i32> = AvlTree::from_elements([1, 5, 2, 3, 4]).unwrap();
	let mut model: BTreeSet<i32> = [1, 5, 2, 3, 4].into_iter().collect();

	for (i, x) in [4, 1, 2, 3, 5].into_iter().enumerate() {
		assert!(tree.delete(&x));
		tree.validate();
		model.remove(&x);
		assert_eq!(tree.len(), 4 - i);
		assert!(!tree.has(&x));
		assert!(tree.iter().eq(model.iter()));
	}

	assert!(tree.is_empty());
	assert_eq!(tree.first(), None);
}

#[test]
pub fn random_insert_remove() {
	let mut rng = SmallRng::from_seed(*SEED);
	let mut tree: AvlTree<u32> = AvlTree::new();

	let mut elements = items(&mut rng, 500);
	for &i in &elements {
		tree.add(i).unwrap();
		tree.validate();
	}

	elements.shuffle(&mut rng);
	for (n, i) in elements.iter().enumerate() {
		assert!(tree.delete(i));
		tree.validate();
		assert_eq!(tree.len(), elements.len() - n - 1);
	}

	assert!(tree.is_empty())
}

#[test]
pub fn random_duplicates() {
	let mut rng = SmallRng::from_seed(*SEED);
	let mut tree: AvlTree<u32> =
		AvlTree::with_options(Options::new().resolve(Resolve::multi())).unwrap();
	let mut counts = [0usize; 20];

	for _ in 0..1000 {
		let x = rng.gen_range(0..20u32);
		if rng.gen_bool(0.6) {
			tree.add(x).unwrap();
			counts[x as usize] += 1;
		} else {
			assert_eq!(tree.delete(&x), counts[x as usize] > 0);
			counts[x as usize] = counts[x as usize].saturating_sub(1);
		}

		tree.validate();
	}

	for (x, &count) in counts.iter().enumerate() {
		let range = tree.equal_keys(&(x as u32));
		assert_eq!(range.len(), count);
		assert_eq!(range.iter().count(), count);
		assert!(range.iter().all(|&y| y == x as u32));
	}

	assert_eq!(tree.len(), counts.iter().sum::<usize>());
}

#[test]
pub fn two_children_deletion() {
	let mut tree: AvlTree<i32> = AvlTree::from_elements(1..=7).unwrap();

	let root = tree.root_id().unwrap();
	let value = *tree.node(root).item();
	assert!(tree.node(root).left().is_some() && tree.node(root).right().is_some());

	let successor = tree.find_key(&(value + 1)).unwrap().address();
	let root_addr = tree.find_key(&value).unwrap().address();
	assert_eq!(tree.delete_at(root_addr), Some(value));
	tree.validate();

	// the successor moved into the deleted slot.
	assert_eq!(tree.get(root_addr), Some(&(value + 1)));
	assert_eq!(tree.get(successor), None);
	assert_eq!(tree.len(), 6);
}

#[test]
pub fn navigation() {
	let tree: AvlTree<i32> = AvlTree::from_elements((0..100).map(|i| i * 2)).unwrap();

	let mut cursor = tree.first();
	let mut expected = 0;
	while let Some(c) = cursor {
		assert_eq!(*c.value(), expected);
		if let Some(prev) = c.prev() {
			assert_eq!(prev.next(), Some(c));
		}

		expected += 2;
		cursor = c.next();
	}

	assert_eq!(expected, 200);

	let last = tree.last().unwrap();
	assert_eq!(tree.step(last.address().id(), Direction::Right), None);
	assert_eq!(*last.value(), 198);
}
