use crate::Error;

/// What to do when inserting an element that collides with a stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ResolveAction {
	/// Reject the insertion with an [`Error`].
	#[default]
	Error,

	/// Overwrite the stored element with the new one.
	Replace,

	/// Keep the stored element and give the new one back.
	Ignore,

	/// Store the new element next to the existing one.
	Insert,
}

/// Duplicate resolution policy of an index.
///
/// The key action is applied first, when an element with an equal key is found.
/// The element action is only consulted when the key action is [`ResolveAction::Insert`]
/// and an equal element is found among the elements sharing the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Resolve {
	pub keys: ResolveAction,
	pub elements: ResolveAction,
}

impl Resolve {
	#[inline]
	pub fn new(keys: ResolveAction, elements: ResolveAction) -> Resolve {
		Resolve { keys, elements }
	}

	/// Allow any duplicate.
	#[inline]
	pub fn multi() -> Resolve {
		Resolve::new(ResolveAction::Insert, ResolveAction::Insert)
	}
}

/// Outcome of the duplicate resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution<A> {
	/// Insert the element as a new entry.
	Proceed,

	/// Overwrite the given entry.
	Replace(A),

	/// Leave the given entry untouched.
	Ignore(A),
}

/// Apply the resolution policy.
///
/// `key_match` is the first stored entry whose key equals the inserted element's key.
/// `element_match` finds a stored entry equal to the inserted element. It is only called if
/// the key action lets the insertion go on.
pub(crate) fn resolve<A, F>(
	policy: Resolve,
	key_match: Option<A>,
	element_match: F,
) -> Result<Resolution<A>, Error>
where
	A: Copy + std::fmt::Debug,
	F: FnOnce() -> Option<A>,
{
	let key_match = match key_match {
		Some(entry) => entry,
		None => return Ok(Resolution::Proceed),
	};

	let resolution = match policy.keys {
		ResolveAction::Error => Err(Error::DuplicateKey),
		ResolveAction::Replace => Ok(Resolution::Replace(key_match)),
		ResolveAction::Ignore => Ok(Resolution::Ignore(key_match)),
		ResolveAction::Insert => match element_match() {
			Some(entry) => match policy.elements {
				ResolveAction::Error => Err(Error::DuplicateElement),
				ResolveAction::Replace => Ok(Resolution::Replace(entry)),
				ResolveAction::Ignore => Ok(Resolution::Ignore(entry)),
				ResolveAction::Insert => Ok(Resolution::Proceed),
			},
			None => Ok(Resolution::Proceed),
		},
	};

	log::debug!("duplicate of {:?} resolved to {:?}", key_match, resolution);
	resolution
}
