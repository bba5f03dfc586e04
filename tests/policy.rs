use slab_index::{
	policy::{fx_hash, Custom},
	AvlTree, ByKey, HashIndex, HashPolicy, KeyPolicy, Natural, Options, Policy, RedBlackTree,
	Resolve, ResolveAction, Value,
};

#[test]
pub fn value_ordering() {
	let natural = Natural;
	let less = |a: &Value, b: &Value| Policy::<Value>::less(&natural, a, b);

	assert!(less(&1.into(), &2.into()));
	assert!(less(&"abc".into(), &"abd".into()));
	assert!(less(&vec![1, 2].into(), &vec![1, 2, 0].into()));
	assert!(less(&vec![1, 2].into(), &vec![1, 3].into()));
	assert!(!less(&vec![1, 3].into(), &vec![1, 2, 5].into()));

	let a = Value::record([("age", 30.into()), ("name", "bob".into())]);
	let b = Value::record([("age", 30.into()), ("name", "eve".into())]);
	assert!(less(&a, &b));
	assert!(!less(&b, &a));

	// incomparable shapes are never less.
	assert!(!less(&1.into(), &"1".into()));
	assert!(!less(&"1".into(), &1.into()));
	assert!(!less(&Value::Null, &false.into()));
}

#[test]
pub fn value_equality_and_hash() {
	let a = Value::record([("x", Value::from(vec![1, 2])), ("y", Value::Null)]);
	let b = Value::record([("y", Value::Null), ("x", Value::from(vec![1, 2]))]);
	assert_eq!(a, b);
	assert_eq!(fx_hash(&a), fx_hash(&b));

	assert_eq!(Value::from(0.0), Value::from(-0.0));
	assert_eq!(fx_hash(&Value::from(0.0)), fx_hash(&Value::from(-0.0)));
	assert_ne!(Value::from(1), Value::from("1"));
	assert_eq!(Value::from(None::<u32>), Value::Null);
}

#[test]
pub fn value_index() {
	let mut tree: AvlTree<Value> = AvlTree::new();
	for v in [Value::from(3), Value::from(1), Value::from(2)] {
		tree.add(v).unwrap();
	}

	let numbers: Vec<f64> = tree.iter().filter_map(Value::as_number).collect();
	assert_eq!(numbers, [1.0, 2.0, 3.0]);

	let mut index: HashIndex<Value> = HashIndex::new();
	index.add(Value::from("a")).unwrap();
	index.add(Value::from(vec!["a"])).unwrap();
	assert!(index.has_key(&Value::from(vec!["a"])));
	assert!(!index.has_key(&Value::from(vec!["b"])));
}

#[test]
pub fn records_by_field() {
	let policy = Custom::by_key(|v: &Value| v.field("id").unwrap_or(&Value::Null));
	let mut tree: RedBlackTree<Value, _> = RedBlackTree::with_options(
		Options::with_policy(policy).on_duplicate_keys(ResolveAction::Replace),
	)
	.unwrap();

	tree.add(Value::record([("id", 2.into()), ("v", "b".into())])).unwrap();
	tree.add(Value::record([("id", 1.into()), ("v", "a".into())])).unwrap();
	tree.add(Value::record([("id", 2.into()), ("v", "c".into())])).unwrap();
	tree.validate();

	assert_eq!(tree.len(), 2);
	let values: Vec<&str> = tree
		.iter()
		.filter_map(|v| v.field("v").and_then(Value::as_str))
		.collect();
	assert_eq!(values, ["a", "c"]);
}

#[test]
pub fn custom_order() {
	let policy = Custom::by_key(|x: &i32| x).ordered_by(|a: &i32, b: &i32| a > b);
	let tree: AvlTree<i32, _> =
		AvlTree::with_options(Options::with_policy(policy).elements([1, 4, 2, 3])).unwrap();

	assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);
	assert_eq!(tree.first().map(|c| *c.value()), Some(4));
}

#[test]
pub fn custom_key_equality() {
	// case insensitive keys.
	let policy = Custom::by_key(|s: &String| s.as_str())
		.ordered_by(|a: &str, b: &str| a.to_lowercase() < b.to_lowercase())
		.keys_equal_by(|a: &str, b: &str| a.eq_ignore_ascii_case(b))
		.hashed_by(|k: &str| fx_hash(&k.to_lowercase()));

	let mut index: HashIndex<String, _> =
		HashIndex::with_options(Options::with_policy(policy.clone())).unwrap();
	index.add("Hello".to_string()).unwrap();
	assert!(index.add("HELLO".to_string()).is_err());
	assert!(index.has_key("hello"));
	assert_eq!(policy.hash("hEllO"), policy.hash("hello"));

	let mut tree: AvlTree<String, _> = AvlTree::with_policy(policy);
	tree.add("b".to_string()).unwrap();
	tree.add("A".to_string()).unwrap();
	assert!(tree.has_key("B"));
	assert_eq!(tree.first().map(|c| c.value().as_str()), Some("A"));
}

#[test]
pub fn pairs() {
	let policy = ByKey;
	assert!(KeyPolicy::<(u32, &str)>::keys_equal(&policy, &1, &1));
	assert!(!KeyPolicy::<(u32, &str)>::elements_equal(&policy, &(1, "a"), &(1, "b")));

	let mut tree: AvlTree<(u32, &str), _> = AvlTree::with_options(
		Options::with_policy(ByKey).resolve(Resolve::new(
			ResolveAction::Insert,
			ResolveAction::Error,
		)),
	)
	.unwrap();

	tree.add((1, "a")).unwrap();
	tree.add((1, "b")).unwrap();
	tree.add((0, "z")).unwrap();
	assert!(tree.add((1, "b")).is_err());

	assert_eq!(
		tree.equal_keys(&1).iter().map(|p| p.1).collect::<Vec<_>>(),
		["a", "b"]
	);
	assert!(tree.delete(&(1, "a")));
	assert_eq!(tree.equal_keys(&1).len(), 1);
}
