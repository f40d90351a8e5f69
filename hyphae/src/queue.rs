//! A singly-linked, first-in, first-out (FIFO) queue.
//!
//! See the documentation for the [`Queue`] type for details.
use crate::{util::FmtOption, Error};
use alloc::boxed::Box;
use core::{fmt, iter::FusedIterator, marker::PhantomData, ptr::NonNull};

/// A singly-linked first-in, first-out (FIFO) queue.
///
/// Elements are [enqueued](Queue::enqueue) at the *head* of the queue and
/// [dequeued](Queue::dequeue) from its *tail*. Both are *O*(1) operations.
///
/// Each element is stored in its own heap-allocated node. The queue owns the
/// node at its tail (the next element to be dequeued), and each node owns the
/// node that was enqueued immediately after it. The head of the queue is a
/// pointer to the most recently enqueued node, which lets new nodes be linked
/// onto the chain without walking it; that pointer never owns the node it
/// points at.
///
/// # Examples
///
/// ```
/// use hyphae::Queue;
///
/// let mut queue = Queue::new();
/// queue.enqueue(1);
/// queue.enqueue(2);
/// queue.enqueue(3);
///
/// assert_eq!(queue.peek(), Ok(&1));
/// assert_eq!(queue.dequeue(), Ok(1));
/// assert_eq!(queue.dequeue(), Ok(2));
///
/// queue.enqueue(4);
/// assert_eq!(queue.drain().collect::<Vec<_>>(), [3, 4]);
/// assert!(queue.dequeue().is_err());
/// ```
pub struct Queue<T> {
    /// The next node to be dequeued.
    tail: Link<T>,

    /// The most recently enqueued node.
    head: Link<T>,

    len: usize,

    _marker: PhantomData<Box<Node<T>>>,
}

/// A draining iterator over a [`Queue`].
///
/// Each call to [`next`](Iterator::next) dequeues an element, so elements are
/// returned in first-in, first-out order. Elements which have not been
/// returned when the `Drain` is dropped remain in the queue.
///
/// This is returned by [`Queue::drain`].
pub struct Drain<'queue, T> {
    queue: &'queue mut Queue<T>,
}

/// Iterates over the elements of a [`Queue`] by reference, in the order they
/// will be dequeued.
///
/// This is returned by [`Queue::iter`].
pub struct Iter<'queue, T> {
    curr: Link<T>,
    remaining: usize,
    _queue: PhantomData<&'queue Queue<T>>,
}

/// An owning iterator over the elements of a [`Queue`], in first-in,
/// first-out order.
pub struct IntoIter<T> {
    queue: Queue<T>,
}

/// Nodes are leaked when they are enqueued and only turned back into a `Box`
/// when they are dequeued, so the `tail` link, the `next` links and the
/// `head` cache never invalidate one another.
type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,

    /// The node enqueued immediately after this one, which is dequeued after
    /// this one.
    next: Link<T>,
}

// === impl Queue ===

impl<T> Queue<T> {
    /// Returns a new `Queue` with no elements in it.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tail: None,
            head: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the queue.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.tail.is_none() {
            debug_assert!(
                self.head.is_none(),
                "inconsistent state: a queue had a head but no tail!"
            );
            return true;
        }

        false
    }

    /// Adds `value` to the head of the queue.
    ///
    /// This is an *O*(1) operation.
    pub fn enqueue(&mut self, value: T) {
        let node = NonNull::from(Box::leak(Box::new(Node { value, next: None })));
        match self.head {
            Some(head) => unsafe {
                // Safety: `head` points at the newest node owned by this
                // queue, and we have exclusive access to the queue.
                let head = head.as_ptr();
                debug_assert!((*head).next.is_none(), "the head node must not have a next node");
                (*head).next = Some(node);
            },
            None => {
                debug_assert!(self.tail.is_none(), "a queue with no head must have no tail");
                self.tail = Some(node);
            }
        }
        self.head = Some(node);
        self.len += 1;
        trace!(len = self.len, "Queue::enqueue");
    }

    /// Removes and returns the element at the tail of the queue (the element
    /// that has been in the queue the longest).
    ///
    /// This is an *O*(1) operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the queue is empty.
    pub fn dequeue(&mut self) -> Result<T, Error> {
        let Some(value) = self.pop_tail() else {
            debug!("Queue::dequeue: queue is empty");
            return Err(Error::Underflow);
        };

        trace!(len = self.len, "Queue::dequeue");
        Ok(value)
    }

    /// Returns a reference to the element that will be dequeued next, without
    /// removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the queue is empty.
    pub fn peek(&self) -> Result<&T, Error> {
        let tail = self.tail.ok_or(Error::Underflow)?;
        // Safety: `tail` is owned by this queue, and the returned reference
        // borrows the queue.
        Ok(unsafe { &(*tail.as_ptr()).value })
    }

    /// Returns a mutable reference to the element that will be dequeued next,
    /// without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Underflow`] if the queue is empty.
    pub fn peek_mut(&mut self) -> Result<&mut T, Error> {
        let tail = self.tail.ok_or(Error::Underflow)?;
        // Safety: `tail` is owned by this queue, and the returned reference
        // mutably borrows the queue. Only the value is borrowed, never the
        // node's link.
        Ok(unsafe { &mut (*tail.as_ptr()).value })
    }

    /// Returns an iterator that dequeues elements from this queue until it is
    /// empty.
    ///
    /// The iterator holds an exclusive borrow of the queue, so the queue cannot
    /// be accessed while it is being drained.
    pub fn drain(&mut self) -> Drain<'_, T> {
        test_trace!(len = self.len, "Queue::drain");
        Drain { queue: self }
    }

    /// Returns an iterator over references to the elements in this queue, in
    /// the order they will be dequeued, without removing them.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            curr: self.tail,
            remaining: self.len,
            _queue: PhantomData,
        }
    }

    /// Asserts as many of the queue's invariants as possible.
    ///
    /// # Panics
    ///
    /// If the queue's cached length or head pointer are inconsistent with the
    /// chain of nodes starting at its tail.
    #[track_caller]
    pub fn assert_valid(&self) {
        let Some(tail) = self.tail else {
            assert!(
                self.head.is_none(),
                "if the queue's tail is None, the head must also be None"
            );
            assert_eq!(self.len, 0, "if the queue's tail is None, its length must be 0");
            return;
        };

        let head = self
            .head
            .expect("if the queue has a tail, it must also have a head");

        let mut steps = 0;
        let mut last = tail;
        // Safety: every node reachable from `tail` is owned by this queue.
        while let Some(next) = unsafe { (*last.as_ptr()).next } {
            steps += 1;
            last = next;
        }

        assert_eq!(
            steps + 1,
            self.len,
            "the head must be reachable from the tail in exactly `len - 1` steps"
        );
        assert_eq!(last, head, "the queue's head must be the last reachable node");
    }

    fn pop_tail(&mut self) -> Option<T> {
        let tail = self.tail?;
        // Safety: `tail` was leaked by `enqueue` and is owned by this queue.
        // It is unlinked here, so no other pointer to it remains in use.
        let Node { value, next } = *unsafe { Box::from_raw(tail.as_ptr()) };
        self.tail = next;
        if self.tail.is_none() {
            // That was the last node, so the head pointer now dangles.
            self.head = None;
        }
        self.len -= 1;
        Some(value)
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        while self.pop_tail().is_some() {}
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Queue<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for Queue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T> Extend<T> for Queue<T> {
    /// Enqueues every element of `iter`, in order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'queue, T> IntoIterator for &'queue Queue<T> {
    type Item = &'queue T;
    type IntoIter = Iter<'queue, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { queue: self }
    }
}

/// # Safety
///
/// A `Queue` is `Send` if `T` is `Send`, because moving it across threads also
/// moves every `T` in the queue. Its links only ever point at nodes owned by
/// the queue itself.
unsafe impl<T: Send> Send for Queue<T> {}

/// # Safety
///
/// Shared access to a `Queue` only permits shared access to its elements;
/// nodes are only written through `&mut Queue`.
unsafe impl<T: Sync> Sync for Queue<T> {}

// === impl Drain ===

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.queue.is_empty() {
            return None;
        }
        self.queue.dequeue().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain")
            .field("next", &FmtOption::new(self.queue.peek().ok()))
            .field("remaining", &self.queue.len)
            .finish()
    }
}

// === impl Iter ===

impl<'queue, T> Iterator for Iter<'queue, T> {
    type Item = &'queue T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.curr?;
        // Safety: the iterator borrows the queue, so the node stays alive and
        // is not mutated for `'queue`.
        let node = unsafe { &*node.as_ptr() };
        self.curr = node.next;
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

/// # Safety
///
/// An `Iter` only hands out shared references, like `&Queue<T>`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
/// # Safety
///
/// An `Iter` only hands out shared references, like `&Queue<T>`.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

// === impl IntoIter ===

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.queue.is_empty() {
            return None;
        }
        self.queue.dequeue().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.queue).finish()
    }
}
