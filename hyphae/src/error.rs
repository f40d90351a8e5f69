//! Errors returned by collection operations.

/// Errors returned by fallible collection operations.
///
/// Every operation that returns an `Error` checks its precondition before
/// touching the collection, so a collection is never left partially modified
/// by a failed operation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An index was outside the range of valid positions for the operation.
    ///
    /// [`LinkedList::get`], [`LinkedList::set`], and [`LinkedList::remove`]
    /// accept indices in `0..len`. [`LinkedList::insert`] also accepts `len`,
    /// which appends to the end of the list.
    ///
    /// [`LinkedList::get`]: crate::LinkedList::get
    /// [`LinkedList::set`]: crate::LinkedList::set
    /// [`LinkedList::remove`]: crate::LinkedList::remove
    /// [`LinkedList::insert`]: crate::LinkedList::insert
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// The length of the collection when the index was rejected.
        len: usize,
    },

    /// An element was requested from an empty collection.
    #[error("cannot access an element of an empty collection")]
    Underflow,
}

impl Error {
    #[inline]
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Returns `true` if this is an [`Error::OutOfRange`] error.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Returns `true` if this is an [`Error::Underflow`] error.
    #[must_use]
    pub fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow)
    }
}
