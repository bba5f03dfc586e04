use thiserror::Error as ThisError;

/// Error returned when an insertion is rejected by the duplicate resolution policy.
///
/// Only raised when the corresponding [`ResolveAction`](crate::ResolveAction) is `Error`.
/// Missing elements are never reported through this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
	/// An element with an equal key is already stored.
	#[error("an element with an equal key is already stored")]
	DuplicateKey,

	/// An equal element is already stored.
	#[error("an equal element is already stored")]
	DuplicateElement,
}
