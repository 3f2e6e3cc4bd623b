#![forbid(unsafe_code)]

//! Observable single-value state store for tally applications.
//!
//! This crate provides the one load-bearing primitive shared by every
//! architecture variant in the workspace:
//!
//! - [`Store`]: a single-slot container for an immutable state snapshot,
//!   with synchronous change notification via subscriber callbacks.
//! - [`Subscription`]: a handle whose explicit `unsubscribe()` (or drop)
//!   removes the associated callback.
//!
//! # Architecture
//!
//! `Store<T>` uses `Rc<RefCell<..>>` for single-threaded shared ownership.
//! All mutation happens through [`Store::replace`], which swaps the snapshot
//! wholesale and then notifies every registered subscriber, in registration
//! order, before returning. There is no deferred tick: by the time `replace`
//! returns, every subscriber has seen the new value.
//!
//! # Invariants
//!
//! 1. At any time there is exactly one current snapshot, readable
//!    synchronously via [`Store::get`] or [`Store::with`].
//! 2. Every `replace` notifies every currently registered subscriber exactly
//!    once, in registration order — including when the new value compares
//!    equal to the old one.
//! 3. The version counter increments by exactly 1 per `replace`.
//! 4. An unsubscribed callback receives zero further notifications.

pub mod store;

pub use store::{Store, Subscription};
