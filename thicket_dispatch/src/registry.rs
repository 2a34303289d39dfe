// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The delegation registry: subscription routes, dispatch, and synthetic
//! triggering.
//!
//! ## Routes and hooks
//!
//! Subscriptions are stored under `(root, kind)` routes in registration
//! order. The registry never touches the host's native listener machinery;
//! it reports, via [`Hook`] values, which routes gained their first
//! subscription (attach one native listener) or lost their last (detach it),
//! keeping the one-native-listener-per-route invariant in the host's hands.
//!
//! ## Delivery
//!
//! [`Registry::dispatch`] fans one raw occurrence out to every subscription
//! on its route: pattern subscriptions resolve the delegated element through
//! [`crate::matcher`] and are skipped on a miss; pattern-free subscriptions
//! always fire with the route root as the resolved element. Callbacks run in
//! registration order and a failing callback is recorded and skipped over,
//! never aborting the dispatch.
//!
//! [`Registry::trigger`] is the synthetic path: it builds a bubbling
//! [`Occurrence`] and re-enters the same delivery at the target and every
//! ancestor holding a route, so gesture subscribers and raw subscribers share
//! one mechanism.
//!
//! ## Re-entrancy
//!
//! Callbacks receive the resolved element, the occurrence, and the caller
//! context — not the registry. Mutating the registry mid-dispatch is
//! therefore unrepresentable; deferred registration changes flow through the
//! context and are applied between dispatches.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::matcher;
use crate::types::{
    DispatchReport, EventError, EventSpec, Hook, NodeQuery, Occurrence, ParentLookup,
    SubscriptionId,
};

struct Subscription<K, D, C> {
    id: SubscriptionId,
    pattern: Option<String>,
    callback: crate::types::Callback<K, D, C>,
}

/// Ordered subscriptions and native-listener bookkeeping for one tree.
///
/// `K` is the host's node handle, `D` the synthetic payload type, and `C`
/// arbitrary caller context threaded into every callback invocation.
///
/// Owned by the application's composition root and passed by reference;
/// nothing here is global or `Send`/`Sync` — the model is single-threaded
/// and cooperative.
pub struct Registry<K, D = (), C = ()> {
    routes: HashMap<K, HashMap<String, Vec<Subscription<K, D, C>>>>,
    staged: Vec<EventSpec<K, D, C>>,
    next_id: u64,
}

impl<K: core::fmt::Debug, D, C> core::fmt::Debug for Registry<K, D, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("roots", &self.routes.len())
            .field("staged", &self.staged.len())
            .finish_non_exhaustive()
    }
}

impl<K, D, C> Default for Registry<K, D, C>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, D, C> Registry<K, D, C>
where
    K: Copy + Eq + Hash,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            staged: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a subscription immediately.
    ///
    /// Returns the subscription's id and, when its `(root, kind)` route is
    /// new, the [`Hook`] the host should attach a native listener for.
    pub fn attach(
        &mut self,
        spec: EventSpec<K, D, C>,
    ) -> Result<(SubscriptionId, Option<Hook<K>>), EventError> {
        if spec.kind.is_empty() {
            return Err(EventError::EmptyKind);
        }
        Ok(self.insert(spec))
    }

    /// Stage a subscription for a later [`Registry::bind_events`].
    ///
    /// Malformed descriptors are rejected here, synchronously.
    pub fn define(&mut self, spec: EventSpec<K, D, C>) -> Result<(), EventError> {
        if spec.kind.is_empty() {
            return Err(EventError::EmptyKind);
        }
        self.staged.push(spec);
        Ok(())
    }

    /// Stage a batch of subscriptions. Fails on the first malformed
    /// descriptor; earlier ones in the batch remain staged.
    pub fn define_all(
        &mut self,
        specs: impl IntoIterator<Item = EventSpec<K, D, C>>,
    ) -> Result<(), EventError> {
        for spec in specs {
            self.define(spec)?;
        }
        Ok(())
    }

    /// Activate every staged subscription, returning the hooks for routes
    /// that now need a native listener.
    pub fn bind_events(&mut self) -> Vec<Hook<K>> {
        let staged = core::mem::take(&mut self.staged);
        let mut hooks = Vec::new();
        for spec in staged {
            let (_, hook) = self.insert(spec);
            hooks.extend(hook);
        }
        hooks
    }

    /// Remove subscriptions on `target`.
    ///
    /// With a kind, removes that route; without one, removes every route
    /// rooted at `target` — raw and delegated alike. Returns the hooks whose
    /// native listeners the host should now detach.
    pub fn unbind(&mut self, target: &K, kind: Option<&str>) -> Vec<Hook<K>> {
        let mut unhooked = Vec::new();
        match kind {
            Some(k) => {
                if let Some(kinds) = self.routes.get_mut(target) {
                    if kinds.remove(k).is_some() {
                        unhooked.push(Hook {
                            root: *target,
                            kind: String::from(k),
                        });
                    }
                    if kinds.is_empty() {
                        self.routes.remove(target);
                    }
                }
            }
            None => {
                if let Some(kinds) = self.routes.remove(target) {
                    for (k, _) in kinds {
                        unhooked.push(Hook {
                            root: *target,
                            kind: k,
                        });
                    }
                }
            }
        }
        unhooked
    }

    /// Remove a single subscription by id.
    ///
    /// Returns the [`Hook`] to detach when the subscription was the last one
    /// on its route, `Some(None)` when the route stays live, and `None` when
    /// no subscription carries the id.
    pub fn remove(&mut self, id: SubscriptionId) -> Option<Option<Hook<K>>> {
        let (root, kind) = self.routes.iter().find_map(|(root, kinds)| {
            kinds.iter().find_map(|(kind, subs)| {
                subs.iter()
                    .any(|s| s.id == id)
                    .then(|| (*root, kind.clone()))
            })
        })?;
        let kinds = self.routes.get_mut(&root)?;
        let subs = kinds.get_mut(&kind)?;
        subs.retain(|s| s.id != id);
        if !subs.is_empty() {
            return Some(None);
        }
        kinds.remove(&kind);
        if kinds.is_empty() {
            self.routes.remove(&root);
        }
        Some(Some(Hook { root, kind }))
    }

    /// Whether a native listener is expected on `(root, kind)`.
    pub fn is_hooked(&self, root: &K, kind: &str) -> bool {
        self.routes
            .get(root)
            .is_some_and(|kinds| kinds.contains_key(kind))
    }

    /// Fan a raw occurrence out to the subscriptions on `(root, kind)`.
    ///
    /// `origin` is the node the occurrence actually landed on; delegation
    /// resolves from it. A root with no live node is an error — the registry
    /// tolerates a root that appears after registration (the pattern
    /// re-queries live nodes), but not one that is entirely absent.
    pub fn dispatch<T>(
        &mut self,
        tree: &T,
        root: K,
        kind: &str,
        origin: K,
        occurrence: &Occurrence<K, D>,
        ctx: &mut C,
    ) -> Result<DispatchReport, EventError>
    where
        T: ParentLookup<K> + NodeQuery<K>,
    {
        if !tree.contains(&root) {
            return Err(EventError::NodeNotFound);
        }
        Ok(self.deliver(tree, root, kind, origin, occurrence, ctx))
    }

    /// Emit a synthetic, bubbling occurrence at `target`.
    ///
    /// Every route for `kind` rooted at `target` or one of its ancestors is
    /// considered, exactly as for a native occurrence. An empty kind or a
    /// dead target is returned as an error for the caller to report; neither
    /// can abort a surrounding dispatch loop.
    pub fn trigger<T>(
        &mut self,
        tree: &T,
        target: K,
        kind: impl Into<Cow<'static, str>>,
        data: Option<D>,
        ctx: &mut C,
    ) -> Result<DispatchReport, EventError>
    where
        T: ParentLookup<K> + NodeQuery<K>,
    {
        let kind = kind.into();
        if kind.is_empty() {
            return Err(EventError::EmptyKind);
        }
        if !tree.contains(&target) {
            return Err(EventError::NodeNotFound);
        }
        let occurrence = Occurrence::synthetic(kind.clone(), target, data);
        let mut report = DispatchReport::default();
        let mut cur = Some(target);
        while let Some(node) = cur {
            report.merge(self.deliver(tree, node, &kind, target, &occurrence, ctx));
            cur = tree.parent_of(&node);
        }
        Ok(report)
    }

    fn insert(&mut self, spec: EventSpec<K, D, C>) -> (SubscriptionId, Option<Hook<K>>) {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let kind = spec.kind.into_owned();
        let kinds = self.routes.entry(spec.root).or_default();
        let new_route = !kinds.contains_key(&kind);
        kinds.entry(kind.clone()).or_default().push(Subscription {
            id,
            pattern: spec.pattern,
            callback: spec.callback,
        });
        let hook = new_route.then_some(Hook {
            root: spec.root,
            kind,
        });
        (id, hook)
    }

    fn deliver<T>(
        &mut self,
        tree: &T,
        root: K,
        kind: &str,
        origin: K,
        occurrence: &Occurrence<K, D>,
        ctx: &mut C,
    ) -> DispatchReport
    where
        T: ParentLookup<K> + NodeQuery<K>,
    {
        let mut report = DispatchReport::default();
        let Some(subs) = self.routes.get_mut(&root).and_then(|m| m.get_mut(kind)) else {
            return report;
        };
        // Callbacks cannot reach the registry, so the route cannot change
        // under this iteration.
        for sub in subs.iter_mut() {
            let receiver = match sub.pattern.as_deref() {
                Some(pattern) => match matcher::resolve(tree, root, Some(pattern), origin) {
                    Some(element) => element,
                    None => continue,
                },
                None => root,
            };
            report.matched += 1;
            if let Err(err) = (sub.callback)(&receiver, occurrence, ctx) {
                report.failures.push((sub.id, err));
            }
        }
        report
    }
}
