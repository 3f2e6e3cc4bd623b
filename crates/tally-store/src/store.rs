#![forbid(unsafe_code)]

//! Single-slot observable store with change notification and version tracking.
//!
//! # Design
//!
//! [`Store<T>`] wraps one value of type `T` in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). The value is replaced wholesale via
//! [`Store::replace`]; it is never mutated in place. After every replacement
//! all subscribers are notified synchronously, in registration order.
//!
//! # Performance
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `get()`       | O(1) + one clone of `T`    |
//! | `replace()`   | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//! | `unsubscribe` | O(S)                       |
//!
//! # Failure Modes
//!
//! - **Re-entrant replace**: calling `replace()` from within a subscriber
//!   callback panics via an explicit notification-in-progress guard.
//!   Re-entrant mutation indicates a design bug in the subscriber graph and
//!   fails fast rather than silently corrupting notification order.
//! - **Panicking subscriber**: a panic inside a callback aborts the
//!   notification pass; later subscribers are not invoked and the store is
//!   left with its guard set. This matches the simplest toolkit behavior
//!   (an unhandled error aborts the rebuild) and is unsuitable for
//!   production use without a catch-and-report layer on top.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

type CallbackRc<T> = Rc<dyn Fn(&T)>;

/// Shared interior for [`Store<T>`].
struct StoreInner<T> {
    value: T,
    version: u64,
    /// Set for the duration of a notification pass; `replace` asserts on it.
    notifying: bool,
    next_id: u64,
    /// Subscribers in registration order. The id is the removal key, so the
    /// same closure can be registered twice and removed independently.
    subscribers: Vec<(u64, CallbackRc<T>)>,
}

/// A shared, version-tracked snapshot holder with change notification.
///
/// Cloning a `Store` creates a new handle to the **same** inner state — both
/// handles see the same snapshot and share subscribers. This is how a store
/// is threaded through controllers and views without a lifetime web.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each `replace`.
/// 2. Subscribers are notified in registration order, each exactly once per
///    `replace`, before `replace` returns.
/// 3. `replace` never compares values: publishing a snapshot equal to the
///    current one still notifies (last-write-wins, no merging, no dedup).
pub struct Store<T> {
    inner: Rc<RefCell<StoreInner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Store<T> {
    /// Create a new store holding the given initial snapshot.
    ///
    /// The initial version is 0 and no subscribers are registered.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                value,
                version: 0,
                notifying: false,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Get a clone of the current snapshot. No side effects, never fails.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current snapshot by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the current snapshot with `next`, then synchronously notify
    /// every registered subscriber in registration order.
    ///
    /// The notification is not deferred: `replace` does not return until all
    /// subscribers registered at the time of the call have been invoked.
    /// No equality check is performed — publishing an equal value notifies
    /// just the same.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from within a subscriber callback.
    pub fn replace(&self, next: T) {
        let version = {
            let mut inner = self.inner.borrow_mut();
            assert!(
                !inner.notifying,
                "re-entrant Store::replace from within a subscriber callback"
            );
            inner.value = next;
            inner.version += 1;
            inner.version
        };
        trace!(version, "snapshot replaced");
        self.notify();
    }

    /// Compute `next = f(current)` and publish it via [`Store::replace`].
    ///
    /// `f` receives the current snapshot by reference and returns the
    /// replacement wholesale; the store never hands out a mutable reference.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from within a subscriber callback.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.borrow().value);
        self.replace(next);
    }

    /// Register `callback` to be invoked with a reference to the new snapshot
    /// on every future `replace`.
    ///
    /// Registering the same closure twice registers it twice: the subscriber
    /// list is just a collection of callbacks, and each registration gets its
    /// own [`Subscription`]. Returns a guard whose explicit
    /// [`Subscription::unsubscribe`] (or drop) removes this registration.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::new(callback)));
            id
        };
        debug!(subscriber = id, "subscriber registered");

        let weak = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                Self::remove_subscriber(&weak, id);
            })),
        }
    }

    /// Current version number. Increments by 1 on each `replace`. Useful for
    /// dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn remove_subscriber(weak: &Weak<RefCell<StoreInner<T>>>, id: u64) {
        // The store may already be gone; unsubscribing then is a no-op.
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
            debug!(subscriber = id, "subscriber removed");
        }
    }

    /// Invoke every subscriber with the current snapshot.
    fn notify(&self) {
        // Collect strong refs first so no borrow is held while callbacks run;
        // a callback may subscribe or unsubscribe (but not replace).
        let (callbacks, value) = {
            let mut inner = self.inner.borrow_mut();
            inner.notifying = true;
            let callbacks: Vec<CallbackRc<T>> = inner
                .subscribers
                .iter()
                .map(|(_, cb)| Rc::clone(cb))
                .collect();
            (callbacks, inner.value.clone())
        };

        for cb in &callbacks {
            cb(&value);
        }

        self.inner.borrow_mut().notifying = false;
    }
}

/// Handle for one subscriber registration.
///
/// [`Subscription::unsubscribe`] removes the callback immediately and is
/// idempotent — a second call is a no-op, not an error. Dropping the handle
/// without calling `unsubscribe` removes the callback as well, so a
/// forgotten guard cannot leak notifications.
pub struct Subscription {
    /// One-shot removal closure; `None` once unsubscribed.
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the associated callback from the store's subscriber list.
    ///
    /// After this returns the callback receives zero further notifications,
    /// regardless of how many more `replace` calls occur. Calling this twice
    /// is a no-op.
    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Whether this handle still has a registered callback behind it.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
