// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Dispatch: delegated event subscriptions for tree UIs.
//!
//! ## Overview
//!
//! This crate routes event occurrences to subscriptions registered against a
//! host UI tree. It owns no nodes and attaches no native listeners; the host
//! exposes its tree through two small traits — [`ParentLookup`] for ancestor
//! walks and [`NodeQuery`] for live descendant queries — and carries out the
//! [`Hook`] bookkeeping the registry hands back.
//!
//! ## Delegation
//!
//! A subscription names a root, an event kind, and optionally a descendant
//! pattern. A pattern-free subscription observes the root itself. A patterned
//! one observes every present-or-future descendant matching the pattern: at
//! dispatch time the occurrence's origin is walked upward and the nearest
//! ancestor in the pattern's current match set becomes the resolved element,
//! passed to the callback as its explicit first argument. Because the match
//! set is re-queried from the live tree per dispatch, descendants created
//! after registration are observed with no re-registration.
//!
//! ## Workflow
//!
//! 1) Register — [`Registry::attach`] for immediate effect, or
//!    [`Registry::define`] + [`Registry::bind_events`] to stage a batch.
//!    Registration yields [`Hook`] values naming the `(root, kind)` routes
//!    that now need exactly one native listener each.
//! 2) Dispatch — feed each native occurrence to [`Registry::dispatch`];
//!    callbacks run in registration order, and failures are collected into a
//!    [`DispatchReport`] without blocking later callbacks.
//! 3) Trigger — [`Registry::trigger`] emits a synthetic bubbling
//!    [`Occurrence`] that walks from the target through its ancestors'
//!    routes, indistinguishable to subscribers from a native occurrence.
//! 4) Unbind — [`Registry::unbind`] removes one route or all routes for a
//!    node and returns the hooks whose native listeners should be detached.
//!
//! ## Gestures
//!
//! With the `gestures` feature, `adapters::gestures::pump` feeds the effect
//! stream of a `thicket_gestures` recognizer into a registry, so delegated
//! subscriptions to `"tap"`, `"swipeleft"`, and the other gesture kinds fire
//! through the same dispatch path as raw input.
//!
//! ## Example
//!
//! ```
//! use thicket_dispatch::{EventSpec, NodeQuery, ParentLookup, Registry};
//!
//! // A two-level tree: a list (0) holding one item (1).
//! struct List;
//! impl ParentLookup<u32> for List {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node == 1).then_some(0)
//!     }
//! }
//! impl NodeQuery<u32> for List {
//!     fn query_all(&self, root: &u32, pattern: &str) -> Vec<u32> {
//!         if *root == 0 && pattern == "item" { vec![1] } else { vec![] }
//!     }
//!     fn contains(&self, node: &u32) -> bool {
//!         *node <= 1
//!     }
//! }
//!
//! let mut registry: Registry<u32, (), Vec<u32>> = Registry::new();
//! registry
//!     .attach(EventSpec::delegated(0, "tap", "item", |el, _occ, seen: &mut Vec<u32>| {
//!         seen.push(*el);
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! let mut seen = Vec::new();
//! let report = registry.trigger(&List, 1, "tap", None, &mut seen).unwrap();
//! assert!(report.ok());
//! assert_eq!(seen, [1]);
//! ```
//!
//! ## Re-entrancy
//!
//! Callbacks receive the resolved element, the occurrence, and a caller
//! context value — never the registry — so registration changes from inside
//! a callback are deferred by construction: stage them in the context and
//! apply them between dispatches.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod matcher;
pub mod registry;
pub mod types;

pub use registry::Registry;
pub use types::{
    Callback, CallbackError, DispatchReport, EventError, EventSpec, Hook, NodeQuery, Occurrence,
    ParentLookup, SubscriptionId,
};
