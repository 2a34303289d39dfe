// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feeding recognizer effects into the dispatch registry.
//!
//! The recognizer in [`thicket_gestures`] is pure: each transition returns
//! [`Effects`] describing what should happen — timers to schedule or cancel,
//! gestures to emit. This adapter consumes one such batch, turning each
//! [`Effect::Emit`] into a bubbling [`Registry::trigger`] under the gesture's
//! kind string and collecting the timer requests for the host's scheduler.
//!
//! Because gesture occurrences re-enter the registry as ordinary synthetic
//! events, the same subscription machinery serves raw input and gestures
//! alike: a delegated `"tap"` subscription cannot tell a recognized tap from
//! a programmatic one.
//!
//! ## Example
//!
//! ```
//! use thicket_dispatch::adapters::gestures::pump;
//! use thicket_dispatch::{EventSpec, NodeQuery, ParentLookup, Registry};
//! use thicket_gestures::{GestureConfig, PressInput, Recognizer};
//! use kurbo::Point;
//!
//! struct Single;
//! impl ParentLookup<u32> for Single {
//!     fn parent_of(&self, _: &u32) -> Option<u32> {
//!         None
//!     }
//! }
//! impl NodeQuery<u32> for Single {
//!     fn query_all(&self, _: &u32, _: &str) -> Vec<u32> {
//!         Vec::new()
//!     }
//!     fn contains(&self, node: &u32) -> bool {
//!         *node == 7
//!     }
//! }
//!
//! let mut registry: Registry<u32, (), u32> = Registry::new();
//! registry
//!     .attach(EventSpec::direct(7, "longtap", |_, _, taps: &mut u32| {
//!         *taps += 1;
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! let mut rec = Recognizer::new(GestureConfig::default());
//! let mut taps = 0_u32;
//!
//! let fx = rec.on_press(PressInput::new(7_u32, Point::ZERO, 1_000));
//! let out = pump(&mut registry, &Single, fx, &mut taps);
//! // The press only armed the long-tap timer.
//! assert_eq!(out.timers.len(), 1);
//! assert_eq!(taps, 0);
//!
//! // The host fires that timer 750 ms later; the hold becomes a long tap.
//! let token = match out.timers[0] {
//!     thicket_dispatch::adapters::gestures::TimerOp::Schedule { token, .. } => token,
//!     _ => unreachable!(),
//! };
//! let fx = rec.on_timer(token);
//! let out = pump(&mut registry, &Single, fx, &mut taps);
//! assert_eq!(out.report.matched, 1);
//! assert_eq!(taps, 1);
//! ```

use core::hash::Hash;

use smallvec::SmallVec;
use thicket_gestures::{Effect, Effects, TimerToken};

use crate::registry::Registry;
use crate::types::{DispatchReport, EventError, NodeQuery, ParentLookup};

/// A timer request for the host's scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOp {
    /// Schedule `token` to fire after `delay_ms` milliseconds.
    Schedule {
        /// Hand this back to the recognizer when the timer fires.
        token: TimerToken,
        /// Delay in milliseconds.
        delay_ms: u64,
    },
    /// Cancel the timer scheduled for `token`, if still pending.
    Cancel(TimerToken),
}

/// What one [`pump`] call produced.
#[derive(Debug, Default)]
pub struct PumpResult {
    /// Timer requests, in the order the recognizer issued them.
    pub timers: SmallVec<[TimerOp; 2]>,
    /// Accumulated dispatch outcome of every emitted gesture.
    pub report: DispatchReport,
    /// Emissions dropped because their target no longer resolves to a live
    /// node. A target removed mid-gesture is expected churn, not an error.
    pub lost_targets: usize,
}

/// Apply one batch of recognizer effects against a registry.
///
/// Emissions trigger under the gesture's kind string (`"tap"`, `"dbltap"`,
/// `"longtap"`, `"swipe"`, `"swipeleft"`, ...) with no payload; timer
/// requests are passed through untouched for the host to schedule.
pub fn pump<K, D, C, T>(
    registry: &mut Registry<K, D, C>,
    tree: &T,
    effects: Effects<K>,
    ctx: &mut C,
) -> PumpResult
where
    K: Copy + Eq + Hash,
    T: ParentLookup<K> + NodeQuery<K>,
{
    let mut out = PumpResult::default();
    for effect in effects {
        match effect {
            Effect::Schedule { token, delay_ms } => {
                out.timers.push(TimerOp::Schedule { token, delay_ms });
            }
            Effect::CancelTimer(token) => {
                out.timers.push(TimerOp::Cancel(token));
            }
            Effect::Emit(ev) => {
                match registry.trigger(tree, ev.target, ev.gesture.kind(), None, ctx) {
                    Ok(report) => out.report.merge(report),
                    Err(EventError::NodeNotFound) => out.lost_targets += 1,
                    // Gesture kind strings are never empty.
                    Err(EventError::EmptyKind) => {}
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventSpec;
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Point;
    use thicket_gestures::{GestureConfig, PressInput, Recognizer, TimerKind};

    /// body > ul > (li, li); presses land on the second item.
    struct ListTree;

    const BODY: u32 = 0;
    const UL: u32 = 1;
    const LI_FIRST: u32 = 2;
    const LI_SECOND: u32 = 3;

    impl ParentLookup<u32> for ListTree {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            match *node {
                UL => Some(BODY),
                LI_FIRST | LI_SECOND => Some(UL),
                _ => None,
            }
        }
    }

    impl NodeQuery<u32> for ListTree {
        fn query_all(&self, root: &u32, pattern: &str) -> Vec<u32> {
            match (*root, pattern) {
                (UL | BODY, "li") => vec![LI_FIRST, LI_SECOND],
                _ => Vec::new(),
            }
        }

        fn contains(&self, node: &u32) -> bool {
            *node <= LI_SECOND
        }
    }

    /// A tree that has forgotten every node.
    struct EmptyTree;

    impl ParentLookup<u32> for EmptyTree {
        fn parent_of(&self, _: &u32) -> Option<u32> {
            None
        }
    }

    impl NodeQuery<u32> for EmptyTree {
        fn query_all(&self, _: &u32, _: &str) -> Vec<u32> {
            Vec::new()
        }

        fn contains(&self, _: &u32) -> bool {
            false
        }
    }

    type Log = Rc<RefCell<Vec<(u32, String)>>>;

    fn delegated_log(reg: &mut Registry<u32>, kind: &'static str, log: &Log) {
        let log = log.clone();
        reg.attach(EventSpec::delegated(UL, kind, "li", move |el, occ, _| {
            log.borrow_mut().push((*el, occ.kind.to_string()));
            Ok(())
        }))
        .unwrap();
    }

    fn schedule_tokens(out: &PumpResult) -> Vec<TimerToken> {
        out.timers
            .iter()
            .filter_map(|op| match op {
                TimerOp::Schedule { token, .. } => Some(*token),
                TimerOp::Cancel(_) => None,
            })
            .collect()
    }

    /// Press, release, and play the recognizer's own timers back into it,
    /// pumping every batch through the registry.
    #[test]
    fn recognized_tap_reaches_a_delegated_subscription() {
        let mut reg: Registry<u32> = Registry::new();
        let log: Log = Rc::default();
        delegated_log(&mut reg, "tap", &log);

        let mut rec = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(LI_SECOND, Point::new(10.0, 10.0), 5_000));
        let out = pump(&mut reg, &ListTree, fx, &mut ());
        assert!(out.report.ok());
        assert!(log.borrow().is_empty());

        let mut pending = schedule_tokens(&out);
        let fx = rec.on_release();
        pending.extend(schedule_tokens(&pump(&mut reg, &ListTree, fx, &mut ())));

        // Drain timers in order until the tap lands.
        while let Some(token) = pending.first().copied() {
            pending.remove(0);
            let fx = rec.on_timer(token);
            pending.extend(schedule_tokens(&pump(&mut reg, &ListTree, fx, &mut ())));
        }
        assert_eq!(*log.borrow(), [(LI_SECOND, "tap".to_string())]);
    }

    #[test]
    fn swipe_triggers_plain_and_directed_kinds() {
        let mut reg: Registry<u32> = Registry::new();
        let log: Log = Rc::default();
        delegated_log(&mut reg, "swipe", &log);
        delegated_log(&mut reg, "swiperight", &log);

        let mut rec = Recognizer::new(GestureConfig::default());
        pump(&mut reg, &ListTree, rec.on_press(PressInput::new(LI_FIRST, Point::ZERO, 0)), &mut ());
        pump(&mut reg, &ListTree, rec.on_move(Point::new(80.0, 5.0)), &mut ());
        let out = pump(&mut reg, &ListTree, rec.on_release(), &mut ());

        // Release only arms the settle timer; firing it emits both kinds.
        assert!(log.borrow().is_empty());
        let settle = schedule_tokens(&out);
        assert_eq!(settle.len(), 1);
        assert_eq!(settle[0].kind, TimerKind::SwipeSettle);
        let out = pump(&mut reg, &ListTree, rec.on_timer(settle[0]), &mut ());
        assert_eq!(out.report.matched, 2);
        assert_eq!(
            *log.borrow(),
            [
                (LI_FIRST, "swipe".to_string()),
                (LI_FIRST, "swiperight".to_string())
            ]
        );
    }

    #[test]
    fn emission_against_a_dead_target_is_counted_not_fatal() {
        let mut reg: Registry<u32> = Registry::new();
        let mut rec = Recognizer::new(GestureConfig::default());

        let fx = rec.on_press(PressInput::new(LI_FIRST, Point::ZERO, 0));
        let out = pump(&mut reg, &EmptyTree, fx, &mut ());
        let long_tap = schedule_tokens(&out)[0];
        // The target vanished while the press was held.
        let out = pump(&mut reg, &EmptyTree, rec.on_timer(long_tap), &mut ());
        assert_eq!(out.lost_targets, 1);
        assert!(out.report.ok());
    }

    #[test]
    fn timer_requests_pass_through_in_order() {
        let mut reg: Registry<u32> = Registry::new();
        let mut rec = Recognizer::new(GestureConfig::default());

        let fx = rec.on_press(PressInput::new(LI_FIRST, Point::ZERO, 0));
        let out = pump(&mut reg, &ListTree, fx, &mut ());
        assert_eq!(out.timers.len(), 1);
        assert!(matches!(
            out.timers[0],
            TimerOp::Schedule {
                delay_ms: 750,
                token: TimerToken {
                    kind: TimerKind::LongTap,
                    ..
                },
            }
        ));

        // A replacing press cancels the stale session's long-tap timer
        // before arming its own.
        let out = pump(
            &mut reg,
            &ListTree,
            rec.on_press(PressInput::new(LI_SECOND, Point::ZERO, 10_000)),
            &mut (),
        );
        assert!(matches!(out.timers[0], TimerOp::Cancel(_)));
        assert!(matches!(out.timers[1], TimerOp::Schedule { .. }));
    }
}
