#![forbid(unsafe_code)]

//! Counter domain layered over the observable store.
//!
//! This crate holds everything between the raw [`tally_store::Store`]
//! primitive and the rendering layer, organized as the seams the demo
//! variants rearrange:
//!
//! - [`model`]: the immutable [`model::Counter`] snapshot and its pure
//!   transitions. Snapshots are replaced wholesale, never mutated in place.
//! - [`controller`]: intention-revealing operations over a snapshot. Two
//!   shapes: a controller holding a store handle, and the more decoupled
//!   variant constructed per render from the latest snapshot plus an
//!   injected publish callback. Capability traits let views depend on
//!   "readable value" and "counter actions" without naming either.
//! - [`persistence`]: the storage collaborator — a fixed-delay stub
//!   database, a JSON file backend, best-effort mirroring, and the
//!   load-before-first-render bootstrap.
//! - [`router`]: path-keyed screen selection that treats the model store as
//!   a refresh signal and builds a fresh controller per navigation.
//! - [`view`]: the minimal [`view::Screen`] seam the router and demos
//!   render through.
//!
//! Everything here runs on one logical thread; stores, controllers, and
//! subscriptions are deliberately `!Send`.

pub mod controller;
pub mod model;
pub mod persistence;
pub mod router;
pub mod view;
