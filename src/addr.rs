use std::fmt;

/// Element location in an index.
///
/// An address designates the arena slot holding one stored element.
/// We write `@id` the address of the element stored in the slot `id`.
///
/// ## Validity
///
/// An address is *valid* as long as the element it designates is stored in the index it was
/// obtained from.
/// Deleting the element invalidates the address.
/// In a search tree, deleting a node with two children moves the in-order successor's element
/// into the deleted node's slot: the deleted address stays valid and now designates the
/// successor, while the successor's previous address becomes invalid.
///
/// Using an invalid address never breaks memory safety,
/// but the result of the operation is unspecified: lookups may return `None`
/// or designate another element stored later in the same slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(usize);

impl Address {
	#[inline]
	pub fn new(id: usize) -> Address {
		Address(id)
	}

	/// Identifier of the arena slot.
	#[inline]
	pub fn id(&self) -> usize {
		self.0
	}
}

impl From<usize> for Address {
	#[inline]
	fn from(id: usize) -> Address {
		Address(id)
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}", self.0)
	}
}

impl fmt::Debug for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "@{}", self.0)
	}
}
