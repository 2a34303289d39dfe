// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridges between the dispatch registry and companion input crates.

#[cfg(feature = "gestures")]
pub mod gestures;
