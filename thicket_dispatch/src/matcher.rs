// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delegated-target resolution.
//!
//! Given an occurrence's origin node and a subscription's pattern, decide
//! which element — the origin or one of its ancestors, up to the delegation
//! root — the subscription actually addresses.
//!
//! The match set is re-queried from the live tree on every call rather than
//! cached, so descendants added or removed between occurrences are always
//! respected. That makes resolution O(descendant count) per dispatch, an
//! acceptable cost at UI-scale trees.

use crate::types::{NodeQuery, ParentLookup};

/// Resolve the delegated element for an occurrence at `origin`.
///
/// With a pattern: walks `origin` upward inclusive, returning the first node
/// present in `tree.query_all(root, pattern)`; the walk stops after testing
/// `root`, so nodes outside the delegation root never match.
///
/// Without a pattern: returns `Some(root)` iff `origin` is `root` or one of
/// its descendants.
///
/// Ancestry is assumed acyclic; the host tree guarantees it.
pub fn resolve<K, T>(tree: &T, root: K, pattern: Option<&str>, origin: K) -> Option<K>
where
    K: Copy + Eq,
    T: ParentLookup<K> + NodeQuery<K>,
{
    let Some(pattern) = pattern else {
        let mut cur = Some(origin);
        while let Some(node) = cur {
            if node == root {
                return Some(root);
            }
            cur = tree.parent_of(&node);
        }
        return None;
    };

    let matches = tree.query_all(&root, pattern);
    let mut cur = Some(origin);
    while let Some(node) = cur {
        if matches.contains(&node) {
            return Some(node);
        }
        if node == root {
            return None;
        }
        cur = tree.parent_of(&node);
    }
    None
}
