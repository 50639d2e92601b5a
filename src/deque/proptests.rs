//! Property-based tests for the deque using proptest
//!
//! Arbitrary operation sequences are replayed against `std::collections::VecDeque`
//! as the model, checking results, ordering, and the capacity bounds after every step.

use super::*;
use crate::Error;
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    AddFirst(i32),
    AddLast(i32),
    RemoveFirst,
    RemoveLast,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::AddFirst),
        any::<i32>().prop_map(Op::AddLast),
        Just(Op::RemoveFirst),
        Just(Op::RemoveLast),
    ]
}

fn check_capacity_bounds(deque: &Deque<i32>) -> Result<(), TestCaseError> {
    let capacity = deque.capacity();
    prop_assert!(capacity.is_power_of_two());
    prop_assert!(capacity >= MIN_CAPACITY);
    prop_assert!(deque.len() <= capacity);
    if deque.is_empty() {
        prop_assert_eq!(capacity, MIN_CAPACITY);
    } else {
        prop_assert!(capacity == MIN_CAPACITY || capacity < 4 * deque.len());
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_matches_vecdeque_model(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut deque: Deque<i32> = Deque::new();
        let mut model: VecDeque<i32> = VecDeque::new();

        for op in ops {
            match op {
                Op::AddFirst(value) => {
                    prop_assert!(deque.add_first(value).is_ok());
                    model.push_front(value);
                }
                Op::AddLast(value) => {
                    prop_assert!(deque.add_last(value).is_ok());
                    model.push_back(value);
                }
                Op::RemoveFirst => {
                    prop_assert_eq!(deque.remove_first(), model.pop_front().ok_or(Error::EmptyContainer));
                }
                Op::RemoveLast => {
                    prop_assert_eq!(deque.remove_last(), model.pop_back().ok_or(Error::EmptyContainer));
                }
            }

            prop_assert_eq!(deque.len(), model.len());
            prop_assert_eq!(deque.is_empty(), deque.len() == 0);
            check_capacity_bounds(&deque)?;
        }

        let collected: Vec<i32> = deque.iter().copied().collect();
        let expected: Vec<i32> = model.iter().copied().collect();
        prop_assert_eq!(collected, expected);
    }

    #[test]
    fn test_iteration_order_independent_of_resize_history(
        values in prop::collection::vec(any::<i32>(), 1..64),
        churn in 0usize..200
    ) {
        // Same logical content, one deque grown and shrunk first
        let mut churned: Deque<i32> = Deque::new();
        for i in 0..churn {
            churned.add_first(i as i32).unwrap();
        }
        for _ in 0..churn {
            churned.remove_last().unwrap();
        }
        for &value in &values {
            churned.add_last(value).unwrap();
        }

        let direct: Deque<i32> = values.iter().copied().collect();

        prop_assert!(churned.iter().eq(direct.iter()));
        prop_assert!(churned.iter().rev().eq(values.iter().rev()));
        prop_assert_eq!(churned, direct);
    }

    #[test]
    fn test_drain_from_both_ends(values in prop::collection::vec(any::<u16>(), 0..100)) {
        let mut deque: Deque<u16> = values.iter().copied().collect();
        let mut front = 0;
        let mut back = values.len();

        while front < back {
            if (back - front) % 2 == 0 {
                prop_assert_eq!(deque.remove_first(), Ok(values[front]));
                front += 1;
            } else {
                prop_assert_eq!(deque.remove_last(), Ok(values[back - 1]));
                back -= 1;
            }
        }

        prop_assert!(deque.is_empty());
        prop_assert_eq!(deque.capacity(), MIN_CAPACITY);
        prop_assert_eq!(deque.remove_first(), Err(Error::EmptyContainer));
    }
}
