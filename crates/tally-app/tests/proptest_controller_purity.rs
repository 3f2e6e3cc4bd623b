//! Property-based purity tests for controller operations.
//!
//! Invariants, for arbitrary input snapshots:
//!
//! 1. `increment` publishes exactly `value + 1` (saturating) and nothing
//!    else; same for `decrement`.
//! 2. `reset` publishes 0 regardless of prior value.
//! 3. Operations are deterministic: the same input snapshot always yields
//!    the same published snapshot.
//! 4. Operations read nothing outside the snapshot they were built with: a
//!    controller never chases values published after its construction.

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use tally_app::controller::{CounterActions, Publish, PublishController};
use tally_app::model::Counter;

fn capture() -> (Publish, Rc<RefCell<Vec<Counter>>>) {
    let published = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&published);
    let publish: Publish = Rc::new(move |next| sink.borrow_mut().push(next));
    (publish, published)
}

proptest! {
    #[test]
    fn increment_publishes_successor(value in any::<i64>()) {
        let (publish, published) = capture();
        let controller = PublishController::new(Counter::new(value), publish);
        controller.increment();
        prop_assert_eq!(
            &*published.borrow(),
            &vec![Counter::new(value.saturating_add(1))]
        );
    }

    #[test]
    fn decrement_publishes_predecessor(value in any::<i64>()) {
        let (publish, published) = capture();
        let controller = PublishController::new(Counter::new(value), publish);
        controller.decrement();
        prop_assert_eq!(
            &*published.borrow(),
            &vec![Counter::new(value.saturating_sub(1))]
        );
    }

    #[test]
    fn reset_publishes_zero(value in any::<i64>()) {
        let (publish, published) = capture();
        let controller = PublishController::new(Counter::new(value), publish);
        controller.reset();
        prop_assert_eq!(&*published.borrow(), &vec![Counter::new(0)]);
    }

    #[test]
    fn operations_are_deterministic(value in any::<i64>(), repeats in 1usize..8) {
        let (publish, published) = capture();
        let controller = PublishController::new(Counter::new(value), publish);
        for _ in 0..repeats {
            controller.increment();
        }
        // Every call published the same successor: the controller computes
        // from its constructed-with snapshot, not from what it published.
        let expected = vec![Counter::new(value.saturating_add(1)); repeats];
        prop_assert_eq!(&*published.borrow(), &expected);
    }
}
