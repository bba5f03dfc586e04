use slab_index::{AvlTree, Indexed, Options, RedBlackTree, Resolve, SearchTree};

macro_rules! range_tests {
	($($name:ident: $ty:ident),*) => {
		$(
			mod $name {
				use super::*;

				fn tree(elements: &[i32]) -> $ty<i32> {
					let tree: $ty<i32> = $ty::with_options(
						Options::new()
							.elements(elements.iter().copied())
							.resolve(Resolve::multi()),
					)
					.unwrap();
					tree.validate();
					tree
				}

				#[test]
				pub fn equal_keys() {
					let tree = tree(&[1, 2, 3, 3, 3, 4, 5]);

					let range = tree.equal_keys(&3);
					assert_eq!(range.len(), 3);
					assert_eq!(range.iter().copied().collect::<Vec<_>>(), [3, 3, 3]);
					assert_eq!(range.first().and_then(|c| c.prev()).map(|c| *c.value()), Some(2));
					assert_eq!(range.last().and_then(|c| c.next()).map(|c| *c.value()), Some(4));

					let range = tree.equal_keys(&7);
					assert!(range.is_empty());
					assert_eq!(range.len(), 0);
					assert_eq!(range.iter().next(), None);
				}

				#[test]
				pub fn equal_keys_shuffled() {
					let tree = tree(&[3, 9, 3, 1, 3, 7, 3, 3, 0, 3, 5, 3]);

					assert_eq!(tree.equal_keys(&3).len(), 7);
					assert_eq!(tree.equal_keys(&3).iter().count(), 7);
					assert_eq!(tree.equal_keys(&9).len(), 1);
					assert_eq!(tree.equal_keys(&4).len(), 0);
				}

				#[test]
				pub fn restartable() {
					let tree = tree(&[5, 4, 3, 2, 1]);
					let range = tree.to_range();

					let first: Vec<i32> = range.iter().copied().collect();
					let second: Vec<i32> = (&range).into_iter().copied().collect();
					assert_eq!(first, [1, 2, 3, 4, 5]);
					assert_eq!(first, second);
				}

				#[test]
				pub fn reverse() {
					let tree = tree(&[1, 2, 3, 4, 5]);

					let range = tree.to_range().reverse();
					assert!(range.is_reversed());
					assert_eq!(range.iter().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
					assert_eq!(range.first().map(|c| *c.value()), Some(5));
					assert_eq!(range.last().map(|c| *c.value()), Some(1));

					let range = range.reverse();
					assert_eq!(range.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
				}

				#[test]
				pub fn double_ended() {
					let tree = tree(&(0..10).collect::<Vec<_>>());

					let mut iter = tree.iter();
					assert_eq!(iter.next(), Some(&0));
					assert_eq!(iter.next_back(), Some(&9));
					assert_eq!(iter.len(), 8);

					let rest: Vec<i32> = iter.by_ref().copied().collect();
					assert_eq!(rest, (1..9).collect::<Vec<_>>());
					assert_eq!(iter.next(), None);
					assert_eq!(iter.next_back(), None);

					let mut iter = tree.to_range().reverse().iter();
					assert_eq!(iter.next(), Some(&9));
					assert_eq!(iter.next_back(), Some(&0));
				}

				#[test]
				pub fn shared_contract() {
					let mut tree = tree(&[2, 2, 3]);
					assert_eq!(Indexed::equal_keys(&tree, &2).into_iter().count(), 2);
					assert_eq!(Indexed::delete_key(&mut tree, &2), 2);
					assert_eq!(Indexed::len(&tree), 1);
					assert!(Indexed::find_key(&tree, &3).is_some());
					Indexed::clear(&mut tree);
					assert!(Indexed::is_empty(&tree));
				}
			}
		)*
	};
}

range_tests! {
	unbalanced: SearchTree,
	avl: AvlTree,
	red_black: RedBlackTree
}
