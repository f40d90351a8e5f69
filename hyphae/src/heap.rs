//! A binary min-heap.
//!
//! See the documentation for the [`MinHeap`] type for details.
use crate::{util::FmtOption, Error};
use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, mem};

/// A binary min-heap.
///
/// Elements are stored in a growable array, laid out so that the element at
/// index `i` is never less than its parent at index `(i - 1) / 2`. The
/// smallest element is therefore always at index 0, where it can be
/// [peeked](MinHeap::peek) in *O*(1) time. [Inserting](MinHeap::insert) and
/// [removing](MinHeap::remove_min) elements are *O*(log *n*) operations.
///
/// Removing elements never shrinks the backing array: space freed by a removal
/// is reused by the next insertion before the array grows.
///
/// The heap orders elements by their [`Ord`] implementation, and only ever
/// swaps two elements when one is *strictly* less than the other. Equal
/// elements are never reordered relative to their parents and children.
///
/// # Examples
///
/// ```
/// use hyphae::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.insert(3);
/// heap.insert(4);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.peek(), Ok(&1));
/// assert_eq!(heap.len(), 4);
///
/// // Draining the heap returns its elements in ascending order.
/// assert_eq!(heap.drain().collect::<Vec<_>>(), [1, 2, 3, 4]);
/// assert!(heap.is_empty());
/// assert!(heap.remove_min().is_err());
/// ```
pub struct MinHeap<T> {
    table: Vec<T>,
}

/// A draining iterator over a [`MinHeap`].
///
/// Each call to [`next`](Iterator::next) removes the heap's minimum element,
/// so elements are returned in ascending order. Elements which have not been
/// returned when the `Drain` is dropped remain in the heap.
///
/// This is returned by [`MinHeap::drain`].
pub struct Drain<'heap, T: Ord> {
    heap: &'heap mut MinHeap<T>,
}

/// An owning iterator over the elements of a [`MinHeap`], in ascending order.
pub struct IntoIter<T: Ord> {
    heap: MinHeap<T>,
}

// === impl MinHeap ===

impl<T> MinHeap<T> {
    /// Returns a new, empty `MinHeap`.
    ///
    /// This does not allocate until an element is inserted.
    #[must_use]
    pub const fn new() -> Self {
        Self { table: Vec::new() }
    }

    /// Returns a new, empty `MinHeap` with space for at least `capacity`
    /// elements before it needs to reallocate.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the heap.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the heap contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of elements the heap can hold without reallocating.
    ///
    /// This never decreases as elements are removed.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns a reference to the smallest element in the heap, without
    /// removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the heap is empty.
    pub fn peek(&self) -> Result<&T, Error> {
        self.table.first().ok_or(Error::Underflow)
    }
}

impl<T: Ord> MinHeap<T> {
    /// Inserts `value` into the heap.
    ///
    /// This is an *O*(log *n*) operation.
    pub fn insert(&mut self, value: T) {
        self.table.push(value);
        self.sift_up(self.table.len() - 1);
        trace!(len = self.table.len(), "MinHeap::insert");
    }

    /// Removes and returns the smallest element in the heap.
    ///
    /// This is an *O*(log *n*) operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the heap is empty.
    pub fn remove_min(&mut self) -> Result<T, Error> {
        let Some(last) = self.table.pop() else {
            debug!("MinHeap::remove_min: heap is empty");
            return Err(Error::Underflow);
        };

        if self.table.is_empty() {
            trace!(len = 0, "MinHeap::remove_min");
            return Ok(last);
        }

        // Put the last element at the root, then move it down to where it
        // belongs.
        let min = mem::replace(&mut self.table[0], last);
        self.sift_down(0);
        trace!(len = self.table.len(), "MinHeap::remove_min");
        Ok(min)
    }

    /// Returns an iterator that removes elements from this heap in ascending
    /// order until it is empty.
    ///
    /// The iterator holds an exclusive borrow of the heap, so the heap cannot
    /// be accessed while it is being drained.
    pub fn drain(&mut self) -> Drain<'_, T> {
        test_trace!(len = self.table.len(), "MinHeap::drain");
        Drain { heap: self }
    }

    /// Asserts that every element in the heap is not less than its parent.
    ///
    /// # Panics
    ///
    /// If the min-heap order property does not hold.
    #[track_caller]
    pub fn assert_valid(&self) {
        for idx in 1..self.table.len() {
            let parent = (idx - 1) / 2;
            assert!(
                self.table[idx] >= self.table[parent],
                "element at index {idx} must not be less than its parent at index {parent}"
            );
        }
    }

    /// Moves the element at `idx` up towards the root until its parent is not
    /// greater than it.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.table[idx] >= self.table[parent] {
                break;
            }
            test_trace!(idx, parent, "MinHeap::sift_up: swap");
            self.table.swap(idx, parent);
            idx = parent;
        }
        test_trace!(idx, "MinHeap::sift_up: done");
    }

    /// Moves the element at `idx` down towards the leaves until neither child
    /// is less than it.
    ///
    /// The right child is only chosen when it is strictly less than both the
    /// left child and the current element; otherwise, the left child is chosen
    /// if it is strictly less than the current element.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.table.len();
        loop {
            let left = (idx * 2) + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let child = if right < len
                && self.table[right] < self.table[left]
                && self.table[right] < self.table[idx]
            {
                right
            } else if self.table[left] < self.table[idx] {
                left
            } else {
                break;
            };

            test_trace!(idx, child, "MinHeap::sift_down: swap");
            self.table.swap(idx, child);
            idx = child;
        }
        test_trace!(idx, "MinHeap::sift_down: done");
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.table.iter()).finish()
    }
}

impl<T: Clone> Clone for MinHeap<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T: Ord> Extend<T> for MinHeap<T> {
    /// Inserts every element of `iter` into the heap.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.table.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> IntoIterator for MinHeap<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { heap: self }
    }
}

// === impl Drain ===

impl<T: Ord> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.heap.is_empty() {
            return None;
        }
        self.heap.remove_min().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Ord> ExactSizeIterator for Drain<'_, T> {}

impl<T: Ord> FusedIterator for Drain<'_, T> {}

impl<T: Ord + fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain")
            .field("next", &FmtOption::new(self.heap.peek().ok()))
            .field("remaining", &self.heap.len())
            .finish()
    }
}

// === impl IntoIter ===

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.heap.is_empty() {
            return None;
        }
        self.heap.remove_min().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}

impl<T: Ord> FusedIterator for IntoIter<T> {}

impl<T: Ord + fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.heap).finish()
    }
}

#[cfg(test)]
mod tests;
