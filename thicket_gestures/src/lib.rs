// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Gestures: a deterministic, `no_std` pointer-gesture recognizer.
//!
//! ## Overview
//!
//! This crate classifies a raw stream of pointer occurrences — press, move,
//! release, cancel — into semantic gestures: tap, double-tap, long-tap, and
//! four-directional swipe. It performs no I/O and never reads a clock:
//! timestamps arrive with each occurrence, and time-based disambiguation is
//! expressed as [`Effect::Schedule`] requests the host executes with whatever
//! timer facility it has. When a timer fires, the host calls
//! [`Recognizer::on_timer`] with the scheduled [`TimerToken`]; stale tokens
//! (from a session that has since ended) are ignored, so cancellation is
//! always safe and never racy.
//!
//! ## Classification
//!
//! - **Swipe**: the dominant axis of displacement between press and the last
//!   move exceeds [`GestureConfig::swipe_length`]. Emission is deferred by one
//!   zero-delay tick so a competing host signal (typically scrolling) can
//!   preempt it via [`Recognizer::on_cancel`]. A `Swipe` gesture is followed
//!   by a direction-qualified one.
//! - **Double-tap**: a press arriving within
//!   [`GestureConfig::double_tap_window_ms`] of the previous press (committed
//!   at its release) marks the session; the second release emits immediately.
//! - **Long-tap**: the press is held for [`GestureConfig::long_tap_delay_ms`]
//!   without movement or release.
//! - **Tap**: everything else, emitted after a one-tick settle plus
//!   [`GestureConfig::single_tap_delay_ms`], and suppressed if movement
//!   arrives before the delay elapses.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use thicket_gestures::{Effect, Gesture, GestureConfig, PressInput, Recognizer};
//!
//! let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
//!
//! // Press and release element 7 without moving.
//! rec.on_press(PressInput::new(7, Point::new(10.0, 10.0), 1_000));
//! let fx = rec.on_release();
//!
//! // The release asks the host to schedule the tap-settle tick.
//! let token = fx
//!     .iter()
//!     .find_map(|e| match e {
//!         Effect::Schedule { token, .. } => Some(*token),
//!         _ => None,
//!     })
//!     .unwrap();
//!
//! // Drive the settle tick and then the single-tap delay by hand.
//! let fx = rec.on_timer(token);
//! let token = fx
//!     .iter()
//!     .find_map(|e| match e {
//!         Effect::Schedule { token, .. } => Some(*token),
//!         _ => None,
//!     })
//!     .unwrap();
//! let fx = rec.on_timer(token);
//! assert!(fx.iter().any(|e| matches!(
//!     e,
//!     Effect::Emit(ev) if ev.gesture == Gesture::Tap && ev.target == 7
//! )));
//! ```
//!
//! ## Single-pointer model
//!
//! Exactly one session lives at a time. A second concurrent contact point is
//! recorded only to suppress single-finger gesture emission for the session;
//! it never starts a second session. Multi-touch gesture composition (pinch,
//! rotate) is out of scope.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod recognizer;
mod types;

pub use recognizer::{PressInput, Recognizer};
pub use types::{
    DisabledPress, Effect, Effects, Gesture, GestureConfig, GestureEvent, SwipeDirection,
    TimerKind, TimerToken,
};
