#![forbid(unsafe_code)]

//! Controllers: named intentions over the counter snapshot.
//!
//! A controller translates a user intention ("increment", "reset") into a
//! pure computation over the last-known snapshot followed by a publish. Two
//! shapes exist, from most to least coupled:
//!
//! - [`StoreController`] holds a [`Store`] handle and reads the current
//!   snapshot from it on every call. Simple, but the controller knows the
//!   concrete notification mechanism.
//! - [`PublishController`] is constructed per render from the latest
//!   snapshot plus an injected [`Publish`] callback. It never names a store
//!   type, so it can be tested with a stub publisher and survives store
//!   implementation swaps untouched. Prefer this shape.
//!
//! Views that want neither concrete type depend on the capability traits
//! [`CounterModel`] (read) and [`CounterActions`] (act) instead.
//!
//! Controllers are transient: construct one per render pass or navigation,
//! use it, drop it. They retain no cross-call state beyond the snapshot
//! they were built with.

use std::rc::Rc;

use tally_store::Store;
use tracing::debug;

use crate::model::Counter;

/// Minimal read-only capability: a current counter value.
pub trait CounterModel {
    fn value(&self) -> i64;
}

/// Minimal action capability: the counter intentions a view may invoke.
pub trait CounterActions {
    fn increment(&self);
    fn decrement(&self);
    fn reset(&self);
}

/// The publish seam: a single-argument callback handing a newly computed
/// snapshot to whoever owns the current state.
pub type Publish = Rc<dyn Fn(Counter)>;

/// Publish callback that replaces the given store's snapshot.
#[must_use]
pub fn publish_to(store: &Store<Counter>) -> Publish {
    let store = store.clone();
    Rc::new(move |next| store.replace(next))
}

/// Controller coupled to a concrete store handle.
///
/// Each operation computes `next = f(current)` from the store's snapshot
/// and replaces it, so the controller itself carries no state.
pub struct StoreController {
    store: Store<Counter>,
}

impl StoreController {
    #[must_use]
    pub fn new(store: Store<Counter>) -> Self {
        Self { store }
    }
}

impl CounterModel for StoreController {
    fn value(&self) -> i64 {
        self.store.with(|c| c.value)
    }
}

impl CounterActions for StoreController {
    fn increment(&self) {
        debug!("intent: increment");
        self.store.update(|c| c.incremented());
    }

    fn decrement(&self) {
        debug!("intent: decrement");
        self.store.update(|c| c.decremented());
    }

    fn reset(&self) {
        debug!("intent: reset");
        self.store.update(|c| c.reset());
    }
}

/// Controller decoupled from the store: holds only the snapshot it was
/// constructed with and a publish callback.
///
/// Construct a fresh one per render from the latest snapshot; a stale
/// controller publishes from a stale snapshot, which is exactly the bug the
/// router's rebuild-on-change contract exists to prevent.
pub struct PublishController {
    snapshot: Counter,
    publish: Publish,
}

impl PublishController {
    #[must_use]
    pub fn new(snapshot: Counter, publish: Publish) -> Self {
        Self { snapshot, publish }
    }
}

impl CounterModel for PublishController {
    fn value(&self) -> i64 {
        self.snapshot.value
    }
}

impl CounterActions for PublishController {
    fn increment(&self) {
        debug!("intent: increment");
        (self.publish)(self.snapshot.incremented());
    }

    fn decrement(&self) {
        debug!("intent: decrement");
        (self.publish)(self.snapshot.decremented());
    }

    fn reset(&self) {
        debug!("intent: reset");
        (self.publish)(self.snapshot.reset());
    }
}
