//! A singly-linked list with index-addressed access.
//!
//! See the [`LinkedList`] type for details.
use crate::Error;
use alloc::boxed::Box;
use core::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut},
    ptr::NonNull,
};

/// A singly-linked list.
///
/// Each element is stored in its own heap-allocated node, and each node owns
/// the node after it. The list owns the first node, so dropping the list drops
/// every element in it.
///
/// The list also caches a pointer to its last node, so that [`append`] is an
/// *O*(1) operation. That pointer never owns the node it points at; it is
/// updated whenever the last node changes.
///
/// Elements are addressed by a zero-based index. Index-addressed operations
/// ([`get`], [`set`], [`insert`], and [`remove`]) walk the list from its head
/// and are *O*(*n*) in the index. An index outside the valid range for an
/// operation is never clamped: the operation fails with
/// [`Error::OutOfRange`] and the list is left unchanged.
///
/// # Examples
///
/// ```
/// use hyphae::LinkedList;
///
/// let mut list: LinkedList<i32> = [1, 2, 4, 8, 16].into_iter().collect();
/// assert_eq!(list.len(), 5);
///
/// // Remove the element at index 2.
/// assert_eq!(list.remove(2), Ok(4));
/// assert_eq!(list.len(), 4);
///
/// // Insert a new element at index 1.
/// list.insert(1, 100).unwrap();
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 100, 2, 8, 16]);
///
/// // Indices past the end of the list are rejected.
/// assert!(list.get(5).is_err());
/// ```
///
/// [`append`]: LinkedList::append
/// [`get`]: LinkedList::get
/// [`set`]: LinkedList::set
/// [`insert`]: LinkedList::insert
/// [`remove`]: LinkedList::remove
pub struct LinkedList<T> {
    head: Link<T>,

    /// Points at the last node in the chain starting at `head`.
    tail: Link<T>,

    len: usize,

    _marker: PhantomData<Box<Node<T>>>,
}

/// Iterates over the elements of a [`LinkedList`] by reference, from front to
/// back.
pub struct Iter<'list, T> {
    curr: Link<T>,
    remaining: usize,
    _list: PhantomData<&'list LinkedList<T>>,
}

/// Iterates over the elements of a [`LinkedList`] by mutable reference, from
/// front to back.
pub struct IterMut<'list, T> {
    curr: Link<T>,
    remaining: usize,
    _list: PhantomData<&'list mut LinkedList<T>>,
}

/// An owning iterator over the elements of a [`LinkedList`], from front to
/// back.
///
/// This is returned by the [`IntoIterator`] implementation for
/// [`LinkedList`].
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

/// A link to a node owned by a [`LinkedList`].
///
/// Every node is allocated with [`Box::leak`] when it is linked into a list,
/// and is only turned back into a `Box` when it is unlinked. All access to
/// nodes in between goes through these pointers, so the `head` link, the
/// `next` links and the `tail` cache never invalidate one another.
type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

// === impl LinkedList ===

impl<T> LinkedList<T> {
    /// Returns a new empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.head.is_none() {
            debug_assert!(
                self.tail.is_none(),
                "inconsistent state: a list had a tail but no head!"
            );
            return true;
        }

        false
    }

    /// Appends an element to the back of the list.
    ///
    /// This is an *O*(1) operation.
    pub fn append(&mut self, value: T) {
        self.push_back(value);
        trace!(len = self.len, "LinkedList::append");
    }

    /// Prepends an element to the front of the list.
    ///
    /// This is an *O*(1) operation.
    pub fn prepend(&mut self, value: T) {
        if self.head.is_none() {
            return self.append(value);
        }

        let node = Node::alloc(value, self.head);
        self.head = Some(node);
        self.len += 1;
        trace!(len = self.len, "LinkedList::prepend");
    }

    /// Returns a reference to the element at `index`.
    ///
    /// This is an *O*(`index`) operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than the list's
    /// length.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyphae::{Error, LinkedList};
    ///
    /// let list: LinkedList<i32> = [1, 2, 4].into_iter().collect();
    /// assert_eq!(list.get(2), Ok(&4));
    /// assert_eq!(list.get(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, Error> {
        let node = self.node(index)?;
        // Safety: the node is owned by this list, and the returned reference
        // borrows the list.
        Ok(unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// This is an *O*(`index`) operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than the list's
    /// length.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let node = self.node(index)?;
        // Safety: the node is owned by this list, and the returned reference
        // mutably borrows the list. Only the value is borrowed, never the
        // node's link.
        Ok(unsafe { &mut (*node.as_ptr()).value })
    }

    /// Overwrites the element at `index` with `value`, returning the element
    /// that was previously stored there.
    ///
    /// The structure of the list is unchanged. This is an *O*(`index`)
    /// operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than the list's
    /// length. In that case, `value` is dropped.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, Error> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, value))
    }

    /// Inserts `value` so that it ends up at position `index`, shifting every
    /// element at or after `index` back by one.
    ///
    /// Inserting at index 0 prepends to the list, and inserting at
    /// [`len`](Self::len) appends to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is greater than the list's
    /// length. In that case, `value` is dropped and the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyphae::LinkedList;
    ///
    /// let mut list: LinkedList<i32> = [1, 2].into_iter().collect();
    /// list.insert(2, 3).unwrap();
    /// list.insert(0, 0).unwrap();
    /// assert!(list.insert(5, 5).is_err());
    /// assert_eq!(list.into_iter().collect::<Vec<_>>(), [0, 1, 2, 3]);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        if index > self.len {
            debug!(index, len = self.len, "LinkedList::insert: index out of range");
            return Err(Error::out_of_range(index, self.len));
        }

        if index == 0 {
            self.prepend(value);
            return Ok(());
        }

        if index == self.len {
            self.append(value);
            return Ok(());
        }

        let prev = self.node(index - 1)?;
        unsafe {
            // Safety: `prev` is owned by this list, and we have exclusive
            // access to the list.
            let prev = prev.as_ptr();
            (*prev).next = Some(Node::alloc(value, (*prev).next));
        }
        self.len += 1;
        trace!(index, len = self.len, "LinkedList::insert");
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting every element after
    /// it forward by one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not less than the list's
    /// length.
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        self.check_index(index)?;

        let value = if index == 0 {
            self.pop_front()
                .expect("a list with a valid index must have a head node")
        } else {
            let prev = self.node(index - 1)?;
            unsafe {
                // Safety: `prev` and the node after it are owned by this list,
                // and we have exclusive access to the list. The removed node
                // is unlinked before it is turned back into a `Box`.
                let prev = prev.as_ptr();
                let removed = (*prev)
                    .next
                    .expect("a node before a valid index must have a next node");
                let Node { value, next } = *Box::from_raw(removed.as_ptr());
                (*prev).next = next;

                if next.is_none() {
                    // The removed node was the tail, so its predecessor is the
                    // new tail.
                    debug_assert_eq!(self.tail, Some(removed));
                    self.tail = NonNull::new(prev);
                }

                self.len -= 1;
                value
            }
        };

        trace!(index, len = self.len, "LinkedList::remove");
        Ok(value)
    }

    /// Returns a reference to the first element in the list, or `None` if the
    /// list is empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        // Safety: `head` points at a node owned by this list, and the returned
        // reference borrows the list.
        self.head.map(|head| unsafe { &(*head.as_ptr()).value })
    }

    /// Returns a reference to the last element in the list, or `None` if the
    /// list is empty.
    ///
    /// Unlike [`get`](Self::get), this is an *O*(1) operation.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        // Safety: `tail` points at a node owned by this list, and the returned
        // reference borrows the list.
        self.tail.map(|tail| unsafe { &(*tail.as_ptr()).value })
    }

    /// Returns an iterator over references to the elements of the list, from
    /// front to back.
    ///
    /// Each call starts a new traversal from the front of the list.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            curr: self.head,
            remaining: self.len,
            _list: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to the elements of the
    /// list, from front to back.
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            curr: self.head,
            remaining: self.len,
            _list: PhantomData,
        }
    }

    /// Asserts as many of the list's invariants as possible.
    ///
    /// # Panics
    ///
    /// If the list's cached length or tail pointer are inconsistent with the
    /// chain of nodes starting at its head.
    #[track_caller]
    pub fn assert_valid(&self) {
        let Some(head) = self.head else {
            assert!(
                self.tail.is_none(),
                "if the linked list's head is None, the tail must also be None"
            );
            assert_eq!(
                self.len, 0,
                "if the linked list's head is None, its length must be 0"
            );
            return;
        };

        let tail = self
            .tail
            .expect("if the linked list has a head, it must also have a tail");

        let mut reachable = 1;
        let mut last = head;
        // Safety: every node reachable from `head` is owned by this list.
        while let Some(next) = unsafe { (*last.as_ptr()).next } {
            reachable += 1;
            last = next;
        }

        assert_eq!(
            reachable, self.len,
            "the linked list's length must equal the number of reachable nodes"
        );
        assert_eq!(
            last, tail,
            "the linked list's tail must be the last reachable node"
        );
    }

    /// Returns the node at `index`, walking from the head of the list.
    fn node(&self, index: usize) -> Result<NonNull<Node<T>>, Error> {
        self.check_index(index)?;
        let mut curr = self
            .head
            .expect("a list with a valid index must have a head node");
        for _ in 0..index {
            // Safety: every node reachable from `head` is owned by this list.
            curr = unsafe { (*curr.as_ptr()).next }
                .expect("a list of length `len` must have `len` reachable nodes");
        }
        test_trace!(index, node = ?curr, "LinkedList::node");
        Ok(curr)
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.len {
            debug!(index, len = self.len, "LinkedList: index out of range");
            return Err(Error::out_of_range(index, self.len));
        }

        Ok(())
    }

    fn push_back(&mut self, value: T) {
        let node = Node::alloc(value, None);
        match self.tail {
            Some(tail) => unsafe {
                // Safety: `tail` points at the last node owned by this list,
                // and we have exclusive access to the list.
                let tail = tail.as_ptr();
                debug_assert!((*tail).next.is_none(), "the tail node must not have a next node");
                (*tail).next = Some(node);
            },
            None => {
                debug_assert!(self.head.is_none(), "a list with no tail must have no head");
                self.head = Some(node);
            }
        }
        self.tail = Some(node);
        self.len += 1;
    }

    fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        // Safety: `head` was allocated by `Node::alloc` and is owned by this
        // list. It is unlinked here, so no other pointer to it remains in use.
        let Node { value, next } = *unsafe { Box::from_raw(head.as_ptr()) };
        self.head = next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Some(value)
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        // Free nodes one at a time, so that dropping a long list doesn't
        // recurse once per node.
        while self.pop_front().is_some() {}
        debug_assert!(self.tail.is_none());
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Extend<T> for LinkedList<T> {
    /// Appends every element of `iter` to the back of the list, in order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        // The first element seeds an empty list; the rest are linked directly
        // after the tail without walking the list.
        for value in iter {
            self.push_back(value);
        }

        trace!(len = self.len, "LinkedList::extend");
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    /// # Panics
    ///
    /// If `index` is out of range.
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    /// # Panics
    ///
    /// If `index` is out of range.
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<'list, T> IntoIterator for &'list LinkedList<T> {
    type Item = &'list T;
    type IntoIter = Iter<'list, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'list, T> IntoIterator for &'list mut LinkedList<T> {
    type Item = &'list mut T;
    type IntoIter = IterMut<'list, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

/// # Safety
///
/// A `LinkedList` is `Send` if `T` is `Send`, because moving it across threads
/// also moves every `T` in the list. Its links only ever point at nodes owned
/// by the list itself.
unsafe impl<T: Send> Send for LinkedList<T> {}

/// # Safety
///
/// Shared access to a `LinkedList` only permits shared access to its
/// elements; nodes are only written through `&mut LinkedList`.
unsafe impl<T: Sync> Sync for LinkedList<T> {}

// === impl Node ===

impl<T> Node<T> {
    /// Allocates a new node and leaks it, returning a pointer to it.
    ///
    /// The node must later be freed with [`Box::from_raw`] when it is unlinked.
    fn alloc(value: T, next: Link<T>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Self { value, next })))
    }
}

// === impl Iter ===

impl<'list, T> Iterator for Iter<'list, T> {
    type Item = &'list T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.curr?;
        // Safety: the iterator borrows the list, so the node stays alive and
        // is not mutated for `'list`.
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

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            curr: self.curr,
            remaining: self.remaining,
            _list: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.remaining).finish()
    }
}

/// # Safety
///
/// An `Iter` only hands out shared references, like `&LinkedList<T>`.
unsafe impl<T: Sync> Send for Iter<'_, T> {}
/// # Safety
///
/// An `Iter` only hands out shared references, like `&LinkedList<T>`.
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

// === impl IterMut ===

impl<'list, T> Iterator for IterMut<'list, T> {
    type Item = &'list mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.curr?;
        // Safety: the iterator mutably borrows the list, and visits each node
        // once, so the returned references never alias. Only the value is
        // borrowed, never the node's link.
        unsafe {
            let node = node.as_ptr();
            self.curr = (*node).next;
            self.remaining -= 1;
            Some(&mut (*node).value)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut").field(&self.remaining).finish()
    }
}

/// # Safety
///
/// An `IterMut` hands out exclusive references, like `&mut LinkedList<T>`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
/// # Safety
///
/// An `IterMut` hands out exclusive references, like `&mut LinkedList<T>`.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

// === impl IntoIter ===

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
