use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use slab_index::{
	generic::{red_black::Color, tree::TreeExt},
	Options, RedBlackTree, Resolve,
};
use std::collections::BTreeSet;

const SEED: &[u8; 32] = b"testseedtestseedtestseedtestseed";

#[test]
pub fn insert_sorted() {
	let mut tree: RedBlackTree<i32> = RedBlackTree::new();
	for i in [1, 5, 2, 3, 4] {
		tree.add(i).unwrap();
		tree.validate();
	}

	assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
	assert_eq!(*tree.node(tree.root_id().unwrap()).tag(), Color::Black);
}

#[test]
pub fn delete_sequence() {
	let mut tree: RedBlackTree<i32> = RedBlackTree::from_elements([1, 5, 2, 3, 4]).unwrap();
	let mut model: BTreeSet<i32> = [1, 5, 2, 3, 4].into_iter().collect();

	for x in [4, 1, 2, 3, 5] {
		assert!(tree.delete(&x));
		tree.validate();
		model.remove(&x);
		assert!(!tree.has(&x));
		assert!(tree.iter().eq(model.iter()));
	}

	assert!(tree.is_empty());
	assert!(!tree.delete(&1));
}

#[test]
pub fn random_insert_remove() {
	let mut rng = SmallRng::from_seed(*SEED);
	let mut tree: RedBlackTree<u32> = RedBlackTree::new();

	let mut elements: Vec<u32> = (0..500).collect();
	elements.shuffle(&mut rng);
	for &i in &elements {
		tree.add(i).unwrap();
		tree.validate();
	}

	assert_eq!(tree.iter().copied().collect::<Vec<_>>(), (0..500).collect::<Vec<_>>());

	elements.shuffle(&mut rng);
	for i in &elements[..250] {
		assert!(tree.delete(i));
		tree.validate();
	}

	assert_eq!(tree.len(), 250);
	for i in &elements[..250] {
		assert!(!tree.has_key(i));
	}

	for i in &elements[250..] {
		assert!(tree.has_key(i));
	}
}

#[test]
pub fn random_duplicates() {
	let mut rng = SmallRng::from_seed(*SEED);
	let mut tree: RedBlackTree<u32> =
		RedBlackTree::with_options(Options::new().resolve(Resolve::multi())).unwrap();
	let mut counts = [0usize; 10];

	for _ in 0..1000 {
		let x = rng.gen_range(0..10u32);
		if rng.gen_bool(0.55) {
			tree.add(x).unwrap();
			counts[x as usize] += 1;
		} else {
			let deleted = tree.delete_key(&x);
			assert_eq!(deleted, counts[x as usize]);
			counts[x as usize] = 0;
		}

		tree.validate();
	}

	for (x, &count) in counts.iter().enumerate() {
		assert_eq!(tree.equal_keys(&(x as u32)).len(), count);
	}
}

#[test]
pub fn delete_at_every_address() {
	let mut rng = SmallRng::from_seed(*SEED);
	let mut tree: RedBlackTree<u32> = RedBlackTree::from_elements(0..200).unwrap();

	while !tree.is_empty() {
		let skip = rng.gen_range(0..tree.len());
		let target = tree.iter().nth(skip).copied().unwrap();
		let addr = tree.find_key(&target).unwrap().address();

		assert_eq!(tree.delete_at(addr), Some(target));
		tree.validate();
	}

	assert_eq!(tree.len(), 0);
}
