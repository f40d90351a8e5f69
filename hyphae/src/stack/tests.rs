use super::*;
use crate::util::trace_init;

#[test]
fn const_new() {
    const _: Stack<i32> = Stack::new();
}

#[test]
fn push_and_pop_one() {
    let _trace = trace_init();

    let mut stack = Stack::new();
    assert_eq!(stack.len(), 0);
    stack.push(5);
    stack.assert_valid();
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.pop(), Ok(5));
    stack.assert_valid();
    assert_eq!(stack.len(), 0);
    assert!(stack.is_empty());
}

#[test]
fn push_and_pop_multiple() {
    let _trace = trace_init();

    let mut stack = Stack::new();
    for val in [5, 6, 7, 8] {
        stack.push(val);
        stack.assert_valid();
    }
    assert_eq!(stack.len(), 4);

    for expected in [8, 7, 6, 5] {
        assert_eq!(stack.pop(), Ok(expected));
        stack.assert_valid();
    }
    assert_eq!(stack.len(), 0);
}

#[test]
fn peek() {
    let _trace = trace_init();

    let mut stack = Stack::new();
    assert_eq!(stack.peek(), Err(Error::Underflow));
    stack.push(5);
    assert_eq!(stack.peek(), Ok(&5));
    stack.push(6);
    assert_eq!(stack.peek(), Ok(&6));
    stack.pop().unwrap();
    assert_eq!(stack.peek(), Ok(&5));
    assert_eq!(stack.len(), 1, "peeking must not remove elements");
}

#[test]
fn peek_mut() {
    let _trace = trace_init();

    let mut stack: Stack<i32> = [1, 2].into_iter().collect();
    *stack.peek_mut().unwrap() = 20;
    assert_eq!(stack.pop(), Ok(20));
    assert_eq!(stack.pop(), Ok(1));
    assert_eq!(stack.peek_mut(), Err(Error::Underflow));
}

#[test]
fn peek_and_pop_empty() {
    let _trace = trace_init();

    let mut stack = Stack::new();
    assert_eq!(stack.peek(), Err(Error::Underflow));
    assert_eq!(stack.pop(), Err(Error::Underflow));

    stack.push(1);
    stack.peek().unwrap();
    stack.pop().unwrap();

    assert_eq!(stack.peek(), Err(Error::Underflow));
    assert_eq!(stack.pop(), Err(Error::Underflow));
    stack.assert_valid();
}

#[test]
fn from_iter() {
    let _trace = trace_init();

    let mut stack: Stack<i32> = [1, 2, 3, 4, 5].into_iter().collect();
    stack.assert_valid();
    assert_eq!(stack.len(), 5);
    assert_eq!(stack.peek(), Ok(&5));
    assert_eq!(stack.drain().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
}

#[test]
fn extend() {
    let _trace = trace_init();

    let mut stack = Stack::new();
    stack.extend([1, 2, 3, 4, 5]);
    stack.assert_valid();
    assert_eq!(stack.drain().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
}

#[test]
fn drain() {
    let _trace = trace_init();

    let mut stack = Stack::new();
    assert_eq!(stack.drain().collect::<Vec<_>>(), Vec::<i32>::new());

    stack.extend([1, 2, 3, 4, 5]);
    assert_eq!(stack.drain().len(), 5);
    assert_eq!(stack.drain().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);

    // The drain consumed every element.
    assert!(stack.is_empty());
    assert_eq!(stack.drain().collect::<Vec<_>>(), Vec::<i32>::new());
    stack.assert_valid();
}

#[test]
fn partial_drain() {
    let _trace = trace_init();

    let mut stack: Stack<i32> = (1..=5).collect();
    {
        let mut drain = stack.drain();
        assert_eq!(drain.next(), Some(5));
        assert_eq!(drain.next(), Some(4));
        assert_eq!(drain.len(), 3);
    }

    stack.assert_valid();
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.peek(), Ok(&3));
}

#[test]
fn iter_does_not_remove() {
    let _trace = trace_init();

    let stack: Stack<i32> = (1..=3).collect();
    assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    assert_eq!((&stack).into_iter().len(), 3);
    assert_eq!(stack.len(), 3);
}

#[test]
fn into_iter() {
    let _trace = trace_init();

    let stack: Stack<i32> = (1..=3).collect();
    assert_eq!(stack.into_iter().collect::<Vec<_>>(), [3, 2, 1]);
}

#[test]
fn clone_and_eq() {
    let _trace = trace_init();

    let stack: Stack<i32> = (1..=3).collect();
    let mut clone = stack.clone();
    clone.assert_valid();
    assert_eq!(stack, clone);
    assert_eq!(clone.pop(), Ok(3));
    assert_ne!(stack, clone);
}

#[test]
fn debug() {
    let mut stack: Stack<i32> = (1..=3).collect();
    assert_eq!(format!("{stack:?}"), "[3, 2, 1]");

    let drain = stack.drain();
    assert_eq!(format!("{drain:?}"), "Drain { next: 3, remaining: 3 }");
    drop(drain);

    stack.drain().for_each(drop);
    assert_eq!(
        format!("{:?}", stack.drain()),
        "Drain { next: None, remaining: 0 }"
    );
}

#[test]
fn drop_long_stack() {
    let len = crate::util::if_miri(1_000, 1_000_000);
    let stack = (0..len).collect::<Stack<usize>>();
    assert_eq!(stack.len(), len);
    drop(stack);
}

#[test]
fn drops_elements() {
    use std::rc::Rc;

    let val = Rc::new(());
    let mut stack = Stack::new();
    for _ in 0..10 {
        stack.push(val.clone());
    }
    drop(stack.pop());
    stack.drain().take(2).for_each(drop);
    assert_eq!(Rc::strong_count(&val), 8);

    drop(stack);
    assert_eq!(Rc::strong_count(&val), 1);
}

#[test]
fn is_send_sync() {
    crate::util::assert_send_sync::<Stack<i32>>();
}

mod fuzz {
    use super::*;
    use crate::util::{fuzz_config, FUZZ_RANGE};
    use proptest::{collection::vec, num::usize::ANY};

    #[derive(Debug)]
    enum Op {
        Push,
        Pop,
        Peek,
        Drain(usize),
    }

    proptest::proptest! {
        #![proptest_config(fuzz_config())]

        #[test]
        fn stack(ops in vec(ANY, FUZZ_RANGE)) {
            let ops = ops
                .iter()
                .map(|i| match i % 4 {
                    0 => Op::Push,
                    1 => Op::Pop,
                    2 => Op::Peek,
                    3 => Op::Drain(i / 4 % 3),
                    _ => unreachable!(),
                })
                .collect::<Vec<_>>();

            let _trace = trace_init();
            let _span = tracing::info_span!("fuzz").entered();
            tracing::info!(?ops);
            run_fuzz(ops);
        }
    }

    fn run_fuzz(ops: Vec<Op>) {
        let mut stack = Stack::<usize>::new();
        let mut reference = Vec::new();

        for (i, op) in ops.iter().enumerate() {
            let _span = tracing::info_span!("op", ?i, ?op).entered();
            match *op {
                Op::Push => {
                    stack.push(i);
                    reference.push(i);
                }
                Op::Pop => {
                    assert_eq!(stack.pop().ok(), reference.pop());
                }
                Op::Peek => {
                    assert_eq!(stack.peek().ok(), reference.last());
                }
                Op::Drain(n) => {
                    let drained = stack.drain().take(n).collect::<Vec<_>>();
                    let expected = (0..n).map_while(|_| reference.pop()).collect::<Vec<_>>();
                    assert_eq!(drained, expected);
                }
            }

            stack.assert_valid();
            assert_eq!(stack.len(), reference.len());
        }

        let drained = stack.drain().collect::<Vec<_>>();
        reference.reverse();
        assert_eq!(drained, reference);
    }
}
