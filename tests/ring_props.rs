use proptest::prelude::*;
use ringbyte::ring::{RingBuffer, RingError};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(u8),
    Overwrite(u8),
    Dequeue,
    Peek(u8),
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Enqueue),
        2 => any::<u8>().prop_map(Op::Overwrite),
        3 => Just(Op::Dequeue),
        2 => any::<u8>().prop_map(Op::Peek),
        1 => Just(Op::Reset),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_sequence_matches_vecdeque(
        capacity in 1usize..16,
        ops in prop::collection::vec(op_strategy(), 1..200),
    ) {
        let mut storage = vec![0u8; capacity];
        let mut ring = RingBuffer::new(&mut storage);
        let mut model: VecDeque<u8> = VecDeque::with_capacity(capacity);

        for op in ops {
            match op {
                Op::Enqueue(v) => {
                    let before = format!("{:?}", ring);
                    let res = ring.enqueue(v);
                    if model.len() == capacity {
                        prop_assert_eq!(res, Err(RingError::Full));
                        prop_assert_eq!(format!("{:?}", ring), before);
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        model.push_back(v);
                    }
                }
                Op::Overwrite(v) => {
                    let evicted = if model.len() == capacity { model.pop_front() } else { None };
                    model.push_back(v);
                    prop_assert_eq!(ring.enqueue_overwrite(v), Ok(evicted));
                }
                Op::Dequeue => {
                    let expected = model.pop_front().ok_or(RingError::Empty);
                    prop_assert_eq!(ring.dequeue(), expected);
                }
                Op::Peek(offset) => {
                    let offset = offset as usize % (capacity + 2);
                    let expected = if model.is_empty() {
                        Err(RingError::Empty)
                    } else {
                        model
                            .get(offset)
                            .copied()
                            .ok_or(RingError::OutOfRange { offset, count: model.len() })
                    };
                    prop_assert_eq!(ring.peek(offset), expected);
                }
                Op::Reset => {
                    ring.reset();
                    model.clear();
                }
            }

            prop_assert!(ring.len() <= ring.capacity());
            prop_assert_eq!(ring.len(), model.len());
            prop_assert_eq!(ring.is_empty(), model.is_empty());
            prop_assert_eq!(ring.is_full(), model.len() == capacity);
            prop_assert!(ring.iter().eq(model.iter().copied()));
        }
    }

    #[test]
    fn prop_fifo_order(values in prop::collection::vec(any::<u8>(), 1..32)) {
        let mut storage = vec![0u8; values.len()];
        let mut ring = RingBuffer::new(&mut storage);

        for &v in &values {
            prop_assert_eq!(ring.enqueue(v), Ok(()));
        }
        prop_assert!(ring.is_full());

        let drained: Vec<u8> = std::iter::from_fn(|| ring.dequeue().ok()).collect();
        prop_assert_eq!(drained, values);
        prop_assert!(ring.is_empty());
    }

    #[test]
    fn prop_overwrite_retains_latest(
        capacity in 1usize..16,
        extra in 1usize..40,
        seed in any::<u8>(),
    ) {
        let mut storage = vec![0u8; capacity];
        let mut ring = RingBuffer::new(&mut storage);
        let values: Vec<u8> = (0..capacity + extra)
            .map(|i| seed.wrapping_add(i as u8))
            .collect();

        for &v in &values {
            ring.enqueue_overwrite(v).unwrap();
            prop_assert!(ring.len() <= capacity);
        }

        let drained: Vec<u8> = std::iter::from_fn(|| ring.dequeue().ok()).collect();
        prop_assert_eq!(&drained[..], &values[extra..]);
    }

    #[test]
    fn prop_peek_does_not_mutate(
        values in prop::collection::vec(any::<u8>(), 1..16),
        rotate in 0usize..16,
        peeks in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let capacity = values.len();
        let mut storage = vec![0u8; capacity];
        let mut ring = RingBuffer::new(&mut storage);

        // move head/tail off zero so peeks cross the wrap point
        for _ in 0..rotate {
            ring.enqueue(0).unwrap();
            ring.dequeue().unwrap();
        }
        ring.enqueue_slice(&values).unwrap();

        let before = format!("{:?}", ring);
        for offset in peeks {
            let offset = offset as usize % capacity;
            prop_assert_eq!(ring.peek(offset), Ok(values[offset]));
        }
        prop_assert_eq!(format!("{:?}", ring), before);

        let drained: Vec<u8> = std::iter::from_fn(|| ring.dequeue().ok()).collect();
        prop_assert_eq!(drained, values);
    }

    #[test]
    fn prop_reset_always_empties(
        capacity in 1usize..16,
        fill in prop::collection::vec(any::<u8>(), 0..40),
    ) {
        let mut storage = vec![0u8; capacity];
        let mut ring = RingBuffer::new(&mut storage);
        for v in fill {
            ring.enqueue_overwrite(v).unwrap();
        }

        ring.reset();
        prop_assert_eq!(ring.len(), 0);
        prop_assert!(ring.is_empty());
        prop_assert!(!ring.is_full());
        prop_assert_eq!(ring.capacity(), capacity);
    }
}

#[test]
fn full_and_empty_together_only_at_zero_capacity() {
    for capacity in 0..4usize {
        let mut storage = vec![0u8; capacity];
        let ring = RingBuffer::new(&mut storage);
        assert_eq!(ring.is_full() && ring.is_empty(), capacity == 0);
    }
}
