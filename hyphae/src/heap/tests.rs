use super::*;
use crate::util::trace_init;
use core::cmp::Ordering;

/// An element that is ordered only by its `key`, so that equal elements can
/// still be told apart.
#[derive(Debug, Clone, Copy)]
struct Keyed {
    key: u32,
    tag: char,
}

impl PartialEq for Keyed {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Keyed {}

impl PartialOrd for Keyed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyed {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

fn keyed(key: u32, tag: char) -> Keyed {
    Keyed { key, tag }
}

#[test]
fn const_new() {
    const _: MinHeap<i32> = MinHeap::new();
}

#[test]
fn insert_and_remove() {
    let _trace = trace_init();

    let mut heap = MinHeap::new();
    heap.insert(2);
    heap.assert_valid();
    assert_eq!(heap.remove_min(), Ok(2));

    heap.insert(4);
    heap.insert(1);
    heap.insert(3);
    heap.assert_valid();
    assert_eq!(heap.remove_min(), Ok(1));
    heap.assert_valid();
    assert_eq!(heap.remove_min(), Ok(3));
    heap.assert_valid();
    assert_eq!(heap.remove_min(), Ok(4));
    assert!(heap.is_empty());
}

#[test]
fn peek() {
    let _trace = trace_init();

    let mut heap = MinHeap::new();
    heap.insert(2);
    assert_eq!(heap.peek(), Ok(&2));
    assert_eq!(heap.peek(), Ok(&2));

    heap.insert(4);
    heap.insert(1);
    heap.insert(3);
    assert_eq!(heap.peek(), Ok(&1));
    assert_eq!(heap.peek(), Ok(&1));
    assert_eq!(heap.len(), 4, "peeking must not remove elements");

    assert_eq!(heap.remove_min(), Ok(1));
    assert_eq!(heap.peek(), Ok(&2));
    assert_eq!(heap.remove_min(), Ok(2));
    assert_eq!(heap.peek(), Ok(&3));
    assert_eq!(heap.remove_min(), Ok(3));
    assert_eq!(heap.peek(), Ok(&4));
}

#[test]
fn drain() {
    let _trace = trace_init();

    let mut heap = MinHeap::new();
    heap.insert(3);
    heap.insert(4);
    heap.insert(1);
    heap.insert(2);
    assert_eq!(heap.len(), 4);

    assert_eq!(heap.drain().collect::<Vec<_>>(), [1, 2, 3, 4]);
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.drain().collect::<Vec<_>>(), Vec::<i32>::new());
}

#[test]
fn partial_drain() {
    let _trace = trace_init();

    let mut heap: MinHeap<i32> = [5, 3, 1, 4, 2].into_iter().collect();
    {
        let mut drain = heap.drain();
        assert_eq!(drain.next(), Some(1));
        assert_eq!(drain.next(), Some(2));
        assert_eq!(drain.len(), 3);
    }

    heap.assert_valid();
    assert_eq!(heap.peek(), Ok(&3));
    assert_eq!(heap.into_iter().collect::<Vec<_>>(), [3, 4, 5]);
}

#[test]
fn remove_and_peek_empty() {
    let _trace = trace_init();

    let mut heap = MinHeap::<i32>::new();
    assert_eq!(heap.peek(), Err(Error::Underflow));
    assert_eq!(heap.remove_min(), Err(Error::Underflow));

    heap.insert(1);
    heap.remove_min().unwrap();

    assert_eq!(heap.peek(), Err(Error::Underflow));
    assert_eq!(heap.remove_min(), Err(Error::Underflow));
}

#[test]
fn duplicates() {
    let _trace = trace_init();

    let vals = [5, 1, 5, 3, 1, 1, 4, 5, 3];
    let mut heap = vals.into_iter().collect::<MinHeap<_>>();
    heap.assert_valid();

    let mut sorted = vals.to_vec();
    sorted.sort_unstable();
    assert_eq!(heap.drain().collect::<Vec<_>>(), sorted);
}

#[test]
fn ties_prefer_left_child() {
    let _trace = trace_init();

    // After removing the root, 'z' is moved to the root with two equal
    // children. Only a strictly smaller right child is preferred over the
    // left one, so 'a' is moved up and comes out before 'b'.
    let mut heap = MinHeap::new();
    heap.insert(keyed(0, 'r'));
    heap.insert(keyed(1, 'a'));
    heap.insert(keyed(1, 'b'));
    heap.insert(keyed(5, 'z'));
    heap.assert_valid();

    let tags = heap.drain().map(|k| k.tag).collect::<Vec<_>>();
    assert_eq!(tags, ['r', 'a', 'b', 'z']);
}

#[test]
fn ties_do_not_swap() {
    let _trace = trace_init();

    // Inserting an element equal to its parent must not move it.
    let mut heap = MinHeap::new();
    heap.insert(keyed(1, 'a'));
    heap.insert(keyed(1, 'b'));
    heap.insert(keyed(1, 'c'));
    assert_eq!(heap.peek().map(|k| k.tag), Ok('a'));

    // Removing 'a' moves 'c' to the root; its only child 'b' is equal, so
    // it stays there.
    assert_eq!(heap.remove_min().map(|k| k.tag), Ok('a'));
    assert_eq!(heap.peek().map(|k| k.tag), Ok('c'));
    assert_eq!(heap.remove_min().map(|k| k.tag), Ok('c'));
    assert_eq!(heap.remove_min().map(|k| k.tag), Ok('b'));
}

#[test]
fn capacity_is_reused() {
    let _trace = trace_init();

    let mut heap = MinHeap::with_capacity(4);
    let capacity = heap.capacity();
    assert!(capacity >= 4);

    for round in 0..10 {
        heap.extend([4, 3, 2, 1]);
        assert_eq!(heap.capacity(), capacity, "round {round}");
        assert_eq!(heap.drain().collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert_eq!(heap.capacity(), capacity, "round {round}");
    }
}

#[test]
fn clone() {
    let _trace = trace_init();

    let heap: MinHeap<i32> = (0..10).rev().collect();
    let clone = heap.clone();
    clone.assert_valid();
    assert_eq!(
        heap.into_iter().collect::<Vec<_>>(),
        clone.into_iter().collect::<Vec<_>>()
    );
}

#[test]
fn debug() {
    let mut heap: MinHeap<i32> = [3, 4, 1, 2].into_iter().collect();
    // Elements are printed in heap order.
    assert_eq!(format!("{heap:?}"), "[1, 2, 3, 4]");
    assert_eq!(
        format!("{:?}", heap.drain()),
        "Drain { next: 1, remaining: 4 }"
    );
}

#[test]
fn is_send_sync() {
    crate::util::assert_send_sync::<MinHeap<i32>>();
}

mod fuzz {
    use super::*;
    use crate::util::{fuzz_config, FUZZ_RANGE};
    use proptest::collection::vec;

    proptest::proptest! {
        #![proptest_config(fuzz_config())]

        #[test]
        fn drain_is_sorted(vals in vec(proptest::num::u8::ANY, FUZZ_RANGE)) {
            let _trace = trace_init();

            let mut heap = MinHeap::new();
            for &val in &vals {
                heap.insert(val);
                heap.assert_valid();
            }
            proptest::prop_assert_eq!(heap.len(), vals.len());

            let mut sorted = vals.clone();
            sorted.sort_unstable();
            proptest::prop_assert_eq!(heap.drain().collect::<Vec<_>>(), sorted);
            proptest::prop_assert!(heap.is_empty());
        }

        #[test]
        fn interleaved(ops in vec(proptest::option::of(proptest::num::u8::ANY), FUZZ_RANGE)) {
            let _trace = trace_init();
            let _span = tracing::info_span!("fuzz").entered();
            tracing::info!(?ops);

            let mut heap = MinHeap::new();
            let mut reference = Vec::new();

            // `Some` inserts a value; `None` removes the minimum.
            for op in ops {
                match op {
                    Some(val) => {
                        heap.insert(val);
                        reference.push(val);
                        reference.sort_unstable_by(|a, b| b.cmp(a));
                    }
                    None => {
                        proptest::prop_assert_eq!(heap.remove_min().ok(), reference.pop());
                    }
                }
                heap.assert_valid();
                proptest::prop_assert_eq!(heap.len(), reference.len());
                proptest::prop_assert_eq!(heap.peek().ok(), reference.last());
            }
        }
    }
}
