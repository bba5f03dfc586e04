use slab_index::{
	generic::tree::TreeExt, Address, AvlTree, Error, Insertion, Options, RedBlackTree, Resolve,
	ResolveAction, SearchTree,
};

#[test]
pub fn unbalanced_shape() {
	let mut tree: SearchTree<i32> = SearchTree::new();
	for i in 0..10 {
		tree.add(i).unwrap();
		tree.validate();
	}

	// ascending insertions build a right spine.
	let mut id = tree.root_id();
	let mut depth = 0;
	while let Some(current) = id {
		assert!(tree.node(current).left().is_none());
		id = tree.node(current).right();
		depth += 1
	}

	assert_eq!(depth, 10);
}

#[test]
pub fn strict_equal_keys() {
	let mut tree: SearchTree<i32> =
		SearchTree::with_options(Options::new().resolve(Resolve::multi())).unwrap();
	for i in [5, 3, 8, 3, 1, 3, 9, 4] {
		tree.add(i).unwrap();
		tree.validate();
	}

	let range = tree.equal_keys(&3);
	assert_eq!(range.len(), 3);
	assert_eq!(range.first().map(|c| *c.value()), Some(3));
	assert_eq!(range.first().unwrap().prev().map(|c| *c.value()), Some(1));
	assert_eq!(range.last().unwrap().next().map(|c| *c.value()), Some(4));

	assert_eq!(tree.delete_key(&3), 3);
	tree.validate();
	assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 4, 5, 8, 9]);
}

#[test]
pub fn floor_ceiling() {
	let tree: AvlTree<i32> = AvlTree::from_elements([10, 20, 30, 40, 50]).unwrap();

	let floor = |k: i32| tree.floor(&k).map(|c| *c.value());
	let ceiling = |k: i32| tree.ceiling(&k).map(|c| *c.value());

	assert_eq!(floor(5), None);
	assert_eq!(floor(10), Some(10));
	assert_eq!(floor(35), Some(30));
	assert_eq!(floor(99), Some(50));

	assert_eq!(ceiling(5), Some(10));
	assert_eq!(ceiling(30), Some(30));
	assert_eq!(ceiling(31), Some(40));
	assert_eq!(ceiling(51), None);
}

#[test]
pub fn floor_ceiling_duplicates() {
	let tree: RedBlackTree<i32> = RedBlackTree::with_options(
		Options::new()
			.elements([2, 2, 2, 4, 4, 6])
			.resolve(Resolve::multi()),
	)
	.unwrap();

	let floor = tree.floor(&4).unwrap();
	assert_eq!(*floor.value(), 4);
	assert_eq!(floor.next().map(|c| *c.value()), Some(6));

	let ceiling = tree.ceiling(&3).unwrap();
	assert_eq!(*ceiling.value(), 4);
	assert_eq!(ceiling.prev().map(|c| *c.value()), Some(2));

	let ceiling = tree.ceiling(&2).unwrap();
	assert_eq!(ceiling.prev(), None);
}

#[test]
pub fn resolve_actions() {
	let mut tree: AvlTree<(i32, &str), _> = AvlTree::with_policy(slab_index::ByKey);
	assert!(tree.add((1, "a")).unwrap().is_new());
	assert_eq!(tree.add((1, "b")), Err(Error::DuplicateKey));

	let mut tree: AvlTree<(i32, &str), _> = AvlTree::with_options(
		Options::with_policy(slab_index::ByKey).on_duplicate_keys(ResolveAction::Replace),
	)
	.unwrap();
	let addr = tree.add((1, "a")).unwrap().address();
	assert_eq!(tree.add((1, "b")), Ok(Insertion::Replaced(addr, (1, "a"))));
	assert_eq!(tree.get(addr), Some(&(1, "b")));

	let mut tree: AvlTree<(i32, &str), _> = AvlTree::with_options(
		Options::with_policy(slab_index::ByKey).on_duplicate_keys(ResolveAction::Ignore),
	)
	.unwrap();
	let addr = tree.add((1, "a")).unwrap().address();
	assert_eq!(tree.add((1, "b")), Ok(Insertion::Ignored(addr, (1, "b"))));
	assert_eq!(tree.len(), 1);

	let mut tree: AvlTree<(i32, &str), _> = AvlTree::with_options(
		Options::with_policy(slab_index::ByKey).on_duplicate_keys(ResolveAction::Insert),
	)
	.unwrap();
	tree.add((1, "a")).unwrap();
	tree.add((1, "b")).unwrap();
	assert_eq!(tree.add((1, "a")), Err(Error::DuplicateElement));
	assert_eq!(tree.equal_keys(&1).len(), 2);
}

#[test]
pub fn initial_duplicates() {
	let result: Result<AvlTree<i32>, _> = AvlTree::from_elements([1, 2, 2]);
	assert_eq!(result.err(), Some(Error::DuplicateKey));
}

#[test]
pub fn get_mut() {
	let mut tree: AvlTree<(i32, u32), _> = AvlTree::with_policy(slab_index::ByKey);
	for i in 0..10 {
		tree.add((i, 0)).unwrap();
	}

	let addr = tree.find_key(&4).unwrap().address();
	tree.get_mut(addr).unwrap().1 = 42;
	assert!(tree.has(&(4, 42)));
	assert!(!tree.has(&(4, 0)));
	assert_eq!(tree.cursor(addr).unwrap().key(), &4);
}

#[test]
pub fn stale_address() {
	let mut tree: SearchTree<i32> = SearchTree::from_elements([1, 2, 3]).unwrap();
	let addr = tree.find_key(&3).unwrap().address();
	assert_eq!(tree.delete_at(addr), Some(3));
	assert_eq!(tree.delete_at(addr), None);
	assert_eq!(tree.get(addr), None);
	assert!(tree.cursor(addr).is_none());
	assert_eq!(tree.get(Address::new(1000)), None);
}

#[test]
pub fn clone_independence() {
	let tree: AvlTree<i32> = AvlTree::from_elements(0..50).unwrap();
	let mut copy = tree.clone();

	copy.delete_key(&10);
	copy.add(100).unwrap();
	copy.validate();

	assert!(tree.has(&10));
	assert!(!tree.has(&100));
	assert_eq!(tree.len(), 50);
	assert_eq!(copy.len(), 50);
	tree.validate();
}

#[test]
pub fn into_iter() {
	let tree: RedBlackTree<String> =
		RedBlackTree::from_elements(["c", "a", "b"].map(String::from)).unwrap();
	let elements: Vec<String> = tree.into_iter().collect();
	assert_eq!(elements, ["a", "b", "c"]);
}

#[test]
pub fn debug() {
	let tree: AvlTree<i32> = AvlTree::from_elements([3, 1, 2]).unwrap();
	assert_eq!(format!("{:?}", tree), "[1, 2, 3]");

	let cursor = tree.find_key(&2).unwrap();
	assert_eq!(format!("{:?}", cursor), format!("{}:2", cursor.address()));
}
