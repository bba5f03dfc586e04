use proptest::prelude::*;
use slab_index::{AvlTree, HashIndex, Options, RedBlackTree, Resolve, SearchTree};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
	Add(u8),
	Delete(u8),
	DeleteKey(u8),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		3 => (0u8..32).prop_map(Op::Add),
		1 => (0u8..32).prop_map(Op::Delete),
		1 => (0u8..32).prop_map(Op::DeleteKey),
	]
}

/// Apply the operations to the model and check the index after each one.
macro_rules! check_against_model {
	($index:expr, $ops:expr, $sorted:expr) => {{
		let mut index = $index;
		let mut model: BTreeMap<u8, usize> = BTreeMap::new();

		for op in $ops {
			match op {
				Op::Add(x) => {
					index.add(x).unwrap();
					*model.entry(x).or_default() += 1;
				}
				Op::Delete(x) => {
					let expected = model.get(&x).copied().unwrap_or(0) > 0;
					prop_assert_eq!(index.delete(&x), expected);
					if expected {
						*model.get_mut(&x).unwrap() -= 1;
					}
				}
				Op::DeleteKey(x) => {
					let expected = model.remove(&x).unwrap_or(0);
					prop_assert_eq!(index.delete_key(&x), expected);
				}
			}

			index.validate();
			prop_assert_eq!(index.len(), model.values().sum::<usize>());
		}

		let mut elements: Vec<u8> = index.iter().copied().collect();
		if !$sorted {
			elements.sort_unstable();
		}

		let expected: Vec<u8> = model
			.iter()
			.flat_map(|(&x, &n)| std::iter::repeat(x).take(n))
			.collect();
		prop_assert_eq!(elements, expected);

		for (x, &n) in &model {
			prop_assert_eq!(index.equal_keys(x).len(), n);
			prop_assert_eq!(index.has_key(x), n > 0);
		}

		let copy = index.clone();
		index.clear();
		prop_assert!(index.is_empty());
		prop_assert_eq!(copy.len(), model.values().sum::<usize>());
	}};
}

fn multi() -> Options<u8> {
	Options::new().resolve(Resolve::multi())
}

proptest! {
	#[test]
	fn search_tree_model(ops in prop::collection::vec(op(), 0..200)) {
		let tree: SearchTree<u8> = SearchTree::with_options(multi()).unwrap();
		check_against_model!(tree, ops, true);
	}

	#[test]
	fn avl_model(ops in prop::collection::vec(op(), 0..200)) {
		let tree: AvlTree<u8> = AvlTree::with_options(multi()).unwrap();
		check_against_model!(tree, ops, true);
	}

	#[test]
	fn red_black_model(ops in prop::collection::vec(op(), 0..200)) {
		let tree: RedBlackTree<u8> = RedBlackTree::with_options(multi()).unwrap();
		check_against_model!(tree, ops, true);
	}

	#[test]
	fn hash_model(ops in prop::collection::vec(op(), 0..200), capacity in 1usize..16) {
		let index: HashIndex<u8> = HashIndex::with_options(multi().capacity(capacity)).unwrap();
		check_against_model!(index, ops, false);
	}

	#[test]
	fn from_elements_sorted(mut elements in prop::collection::hash_set(any::<i64>(), 0..100)
		.prop_map(|set| set.into_iter().collect::<Vec<_>>()))
	{
		let tree: AvlTree<i64> = AvlTree::from_elements(elements.iter().copied()).unwrap();
		tree.validate();

		elements.sort_unstable();
		prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), elements.clone());
		prop_assert_eq!(tree.iter().rev().copied().collect::<Vec<_>>(), elements.iter().rev().copied().collect::<Vec<_>>());
		prop_assert_eq!(tree.into_iter().collect::<Vec<_>>(), elements);
	}
}
