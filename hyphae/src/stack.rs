//! A singly-linked, last-in, first-out (LIFO) stack.
//!
//! See the documentation for the [`Stack`] type for details.
use crate::{util::FmtOption, Error};
use alloc::{boxed::Box, vec::Vec};
use core::{fmt, iter::FusedIterator};

/// A singly-linked last-in, first-out (LIFO) stack.
///
/// A stack provides two primary operations:
///
/// - [`Stack::push`], which places an element on top of the stack,
///
/// - [`Stack::pop`], which removes and returns the element on top of the
///   stack.
///
/// These are both *O*(1) operations that never loop. Each element is stored in
/// its own heap-allocated node, and each node owns the node that was pushed
/// before it. Dropping a `Stack` drops all elements currently in the stack.
///
/// # Examples
///
/// ```
/// use hyphae::Stack;
///
/// let mut stack = Stack::new();
/// stack.push(1);
/// stack.push(2);
/// assert_eq!(stack.peek(), Ok(&2));
/// assert_eq!(stack.pop(), Ok(2));
/// assert_eq!(stack.pop(), Ok(1));
/// assert!(stack.pop().is_err());
/// ```
///
/// Constructing a stack from an iterator pushes each element in order, so the
/// last element ends up on top:
///
/// ```
/// use hyphae::Stack;
///
/// let mut stack: Stack<i32> = [1, 2, 3, 4, 5].into_iter().collect();
/// assert_eq!(stack.drain().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
/// assert!(stack.is_empty());
/// ```
pub struct Stack<T> {
    head: Link<T>,
    len: usize,
}

/// A draining iterator over a [`Stack`].
///
/// Each call to [`next`](Iterator::next) pops an element from the stack, so
/// elements are returned in last-in, first-out order. Elements which have not
/// been returned when the `Drain` is dropped remain in the stack.
///
/// This is returned by [`Stack::drain`].
pub struct Drain<'stack, T> {
    stack: &'stack mut Stack<T>,
}

/// Iterates over the elements of a [`Stack`] by reference, from the top of
/// the stack to the bottom.
///
/// This is returned by [`Stack::iter`].
pub struct Iter<'stack, T> {
    curr: Option<&'stack Node<T>>,
    remaining: usize,
}

/// An owning iterator over the elements of a [`Stack`], from the top of the
/// stack to the bottom.
pub struct IntoIter<T> {
    stack: Stack<T>,
}

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

// === impl Stack ===

impl<T> Stack<T> {
    /// Returns a new `Stack` with no elements in it.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of elements in the stack.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if this `Stack` is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Pushes `value` onto the top of this `Stack`.
    ///
    /// This is an *O*(1) operation.
    pub fn push(&mut self, value: T) {
        let node = Box::new(Node {
            value,
            next: self.head.take(),
        });
        self.head = Some(node);
        self.len += 1;
        trace!(len = self.len, "Stack::push");
    }

    /// Removes and returns the element most recently [push](Self::push)ed to
    /// this `Stack`.
    ///
    /// This is an *O*(1) operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the stack is empty.
    pub fn pop(&mut self) -> Result<T, Error> {
        let Some(head) = self.head.take() else {
            debug!("Stack::pop: stack is empty");
            return Err(Error::Underflow);
        };

        // advance the head link to the node pushed before the current one (if
        // there is one).
        let Node { value, next } = *head;
        self.head = next;
        self.len -= 1;
        trace!(len = self.len, "Stack::pop");
        Ok(value)
    }

    /// Returns a reference to the element on top of the stack, without removing
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the stack is empty.
    pub fn peek(&self) -> Result<&T, Error> {
        self.head
            .as_deref()
            .map(|node| &node.value)
            .ok_or(Error::Underflow)
    }

    /// Returns a mutable reference to the element on top of the stack, without
    /// removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the stack is empty.
    pub fn peek_mut(&mut self) -> Result<&mut T, Error> {
        self.head
            .as_deref_mut()
            .map(|node| &mut node.value)
            .ok_or(Error::Underflow)
    }

    /// Returns an iterator that pops elements from this stack until it is
    /// empty.
    ///
    /// The iterator holds an exclusive borrow of the stack, so the stack cannot
    /// be accessed while it is being drained.
    pub fn drain(&mut self) -> Drain<'_, T> {
        test_trace!(len = self.len, "Stack::drain");
        Drain { stack: self }
    }

    /// Returns an iterator over references to the elements in this stack, from
    /// the top of the stack to the bottom, without removing them.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            curr: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Asserts as many of the stack's invariants as possible.
    ///
    /// # Panics
    ///
    /// If the stack's cached length is not equal to the number of nodes
    /// reachable from the top of the stack.
    #[track_caller]
    pub fn assert_valid(&self) {
        let mut reachable = 0;
        let mut curr = self.head.as_deref();
        while let Some(node) = curr {
            reachable += 1;
            curr = node.next.as_deref();
        }
        assert_eq!(
            reachable, self.len,
            "the stack's length must equal the number of reachable nodes"
        );
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        // The stack owns any entries that are still in the stack; unlink them
        // one at a time so that dropping a long stack doesn't recurse.
        let mut curr = self.head.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Stack<T> {
    fn clone(&self) -> Self {
        // `iter` yields elements top to bottom; rebuild the stack bottom up so
        // that the clone has the same top.
        let mut values = self.iter().collect::<Vec<_>>();
        let mut stack = Self::new();
        while let Some(value) = values.pop() {
            stack.push(value.clone());
        }
        stack
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T> Extend<T> for Stack<T> {
    /// Pushes every element of `iter` onto the stack, in order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        stack.extend(iter);
        stack
    }
}

impl<'stack, T> IntoIterator for &'stack Stack<T> {
    type Item = &'stack T;
    type IntoIter = Iter<'stack, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Stack<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { stack: self }
    }
}

// === impl Drain ===

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_empty() {
            return None;
        }
        self.stack.pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len, Some(self.stack.len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain")
            .field("next", &FmtOption::new(self.stack.peek().ok()))
            .field("remaining", &self.stack.len)
            .finish()
    }
}

// === impl Iter ===

impl<'stack, T> Iterator for Iter<'stack, T> {
    type Item = &'stack T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.curr?;
        self.curr = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.remaining).finish()
    }
}

// === impl IntoIter ===

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.stack.is_empty() {
            return None;
        }
        self.stack.pop().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len, Some(self.stack.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.stack).finish()
    }
}

#[cfg(test)]
mod tests;
