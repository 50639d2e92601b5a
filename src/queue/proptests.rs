//! Property-based tests for the randomized queue using proptest
//!
//! The queue must behave as a multiset: whatever random choices it makes, every
//! element that goes in comes out exactly once, and the chain stays well formed.

use super::*;
use crate::Error;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(i16),
    Dequeue,
    Sample,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i16>().prop_map(Op::Enqueue),
        2 => Just(Op::Dequeue),
        1 => Just(Op::Sample),
    ]
}

fn remove_one(model: &mut Vec<i16>, value: i16) -> bool {
    match model.iter().position(|&candidate| candidate == value) {
        Some(position) => {
            model.swap_remove(position);
            true
        }
        None => false,
    }
}

proptest! {
    #[test]
    fn test_behaves_as_multiset(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..300)
    ) {
        let mut queue: RandomizedQueue<i16, StdRng> =
            RandomizedQueue::with_rng(StdRng::seed_from_u64(seed));
        let mut model: Vec<i16> = Vec::new();

        for op in ops {
            match op {
                Op::Enqueue(value) => {
                    prop_assert!(queue.enqueue(value).is_ok());
                    model.push(value);
                }
                Op::Dequeue => match queue.dequeue() {
                    Ok(value) => prop_assert!(remove_one(&mut model, value)),
                    Err(error) => {
                        prop_assert_eq!(error, Error::EmptyContainer);
                        prop_assert!(model.is_empty());
                    }
                },
                Op::Sample => match queue.sample() {
                    Ok(value) => prop_assert!(model.contains(value)),
                    Err(error) => {
                        prop_assert_eq!(error, Error::EmptyContainer);
                        prop_assert!(model.is_empty());
                    }
                },
            }

            prop_assert_eq!(queue.len(), model.len());
            prop_assert_eq!(queue.is_empty(), queue.len() == 0);
            prop_assert!(queue.check_links());
            prop_assert!(queue.is_empty() || queue.slot_count() < 4 * queue.len());
        }

        let mut iterated: Vec<i16> = queue.iter().copied().collect();
        let mut drained: Vec<i16> = queue.into_iter().collect();
        iterated.sort_unstable();
        drained.sort_unstable();
        model.sort_unstable();
        prop_assert_eq!(&iterated, &model);
        prop_assert_eq!(&drained, &model);
    }

    #[test]
    fn test_iteration_is_a_permutation(
        seed in any::<u64>(),
        values in prop::collection::vec(any::<u8>(), 0..64)
    ) {
        let mut queue: RandomizedQueue<u8, StdRng> =
            RandomizedQueue::with_rng(StdRng::seed_from_u64(seed));
        queue.extend(values.iter().copied());

        for _ in 0..3 {
            let iter = queue.iter();
            prop_assert_eq!(iter.len(), values.len());
            let mut visited: Vec<u8> = iter.copied().collect();
            let mut expected = values.clone();
            visited.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(visited, expected);
        }
        prop_assert_eq!(queue.len(), values.len());
    }
}
