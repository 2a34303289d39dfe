// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core dispatch types: occurrences, subscriptions, hooks, and errors.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Read-only ancestor traversal over the host's UI tree.
///
/// `K` is the host's node handle; the library never owns nodes and never
/// caches structure, so handles may be generational ids, indices, or any
/// other cheap key.
pub trait ParentLookup<K> {
    /// The parent of `node`, or `None` at the tree root (or for a dead node).
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Live descendant queries over the host's UI tree.
pub trait NodeQuery<K> {
    /// All current descendants of `root` matching `pattern`.
    ///
    /// Called on every dispatch rather than cached, so nodes added or removed
    /// between occurrences are always respected.
    fn query_all(&self, root: &K, pattern: &str) -> Vec<K>;

    /// Whether `node` currently resolves to a live node.
    fn contains(&self, node: &K) -> bool;
}

/// A discrete dispatched event instance, raw or synthetic.
///
/// Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence<K, D = ()> {
    /// Event-kind string, e.g. `"tap"` or a host-native kind.
    pub kind: Cow<'static, str>,
    /// The node the occurrence originated at.
    pub target: K,
    /// Opaque payload attached by the emitter.
    pub data: Option<D>,
    /// Whether the occurrence traverses ancestor subscriptions.
    pub bubbles: bool,
}

impl<K, D> Occurrence<K, D> {
    /// A synthetic, bubbling occurrence as built by
    /// [`Registry::trigger`](crate::registry::Registry::trigger).
    pub fn synthetic(kind: impl Into<Cow<'static, str>>, target: K, data: Option<D>) -> Self {
        Self {
            kind: kind.into(),
            target,
            data,
            bubbles: true,
        }
    }
}

/// Identifier of one registered subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

/// A native-listener bookkeeping request.
///
/// The registry attaches exactly one native listener per `(root, kind)`
/// route. It does not talk to the host directly; instead, registration
/// returns a `Hook` when a route gains its first subscription, and
/// unbinding returns the hooks whose routes emptied, so the host knows
/// precisely which native listeners to attach or detach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hook<K> {
    /// The delegation root the native listener belongs on.
    pub root: K,
    /// The event kind the native listener observes.
    pub kind: String,
}

/// An error raised by a subscriber callback.
///
/// Opaque to the dispatcher: the message is carried through
/// [`DispatchReport::failures`] for the host to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    /// Wrap a subscriber failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl core::fmt::Display for CallbackError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "subscriber callback failed: {}", self.message)
    }
}

impl core::error::Error for CallbackError {}

/// Errors surfaced by registration and dispatch entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventError {
    /// The event kind is empty; malformed descriptors are rejected
    /// synchronously at definition or trigger time.
    EmptyKind,
    /// The dispatch root or trigger target does not resolve to a live node.
    /// Never fatal to the dispatch loop; the caller decides how to report it.
    NodeNotFound,
}

impl core::fmt::Display for EventError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyKind => f.write_str("event kind is empty"),
            Self::NodeNotFound => f.write_str("target does not resolve to a live node"),
        }
    }
}

impl core::error::Error for EventError {}

/// A subscriber callback.
///
/// The element resolved by delegation is the explicit first argument (for a
/// pattern-free subscription it is the subscription's own root). `C` is
/// caller context threaded through every invocation of a dispatch.
pub type Callback<K, D = (), C = ()> =
    Box<dyn FnMut(&K, &Occurrence<K, D>, &mut C) -> Result<(), CallbackError>>;

/// A subscription descriptor: which root and kind to observe, an optional
/// delegation pattern, and the callback to invoke.
pub struct EventSpec<K, D = (), C = ()> {
    /// Delegation root (or the concrete node itself, for direct listening).
    pub root: K,
    /// Event kind to observe.
    pub kind: Cow<'static, str>,
    /// Descendant-selecting pattern; `None` subscribes the root directly.
    pub pattern: Option<String>,
    /// Callback invoked per matching occurrence.
    pub callback: Callback<K, D, C>,
}

impl<K, D, C> EventSpec<K, D, C> {
    /// Subscribe `root` itself to `kind`.
    pub fn direct(
        root: K,
        kind: impl Into<Cow<'static, str>>,
        callback: impl FnMut(&K, &Occurrence<K, D>, &mut C) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        Self {
            root,
            kind: kind.into(),
            pattern: None,
            callback: Box::new(callback),
        }
    }

    /// Subscribe present-or-future descendants of `root` matching `pattern`.
    pub fn delegated(
        root: K,
        kind: impl Into<Cow<'static, str>>,
        pattern: impl Into<String>,
        callback: impl FnMut(&K, &Occurrence<K, D>, &mut C) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        Self {
            root,
            kind: kind.into(),
            pattern: Some(pattern.into()),
            callback: Box::new(callback),
        }
    }
}

impl<K: core::fmt::Debug, D, C> core::fmt::Debug for EventSpec<K, D, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventSpec")
            .field("root", &self.root)
            .field("kind", &self.kind)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Outcome of one dispatch: how many subscriptions matched and which
/// callbacks failed. A failed callback never blocks later ones.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Subscriptions whose callback was invoked.
    pub matched: usize,
    /// Per-subscription failures, in invocation order.
    pub failures: Vec<(SubscriptionId, CallbackError)>,
}

impl DispatchReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.matched += other.matched;
        self.failures.extend(other.failures);
    }

    /// Whether every invoked callback succeeded.
    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }
}
