// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture classification state machine.
//!
//! ## Overview
//!
//! [`Recognizer`] holds at most one live session — the state of a single
//! press-to-release interaction — and advances it through four entry points:
//! [`Recognizer::on_press`],
//! [`Recognizer::on_move`], [`Recognizer::on_release`], and
//! [`Recognizer::on_cancel`]. Every transition returns the [`Effects`] the
//! host must carry out: timer scheduling, timer cancellation, and gesture
//! emission.
//!
//! ## Session lifecycle
//!
//! A session is created on press, mutated on move, and consumed on release or
//! cancel. Release does not always end it immediately: tentative tap and
//! swipe classifications keep the session alive until a settle timer resolves
//! them, which is the window in which a competing scroll signal (routed to
//! [`Recognizer::on_cancel`]) or further movement can suppress the gesture.
//! Each session carries a generation number stamped into every
//! [`TimerToken`] it schedules; ending the session bumps the generation, so
//! timers the host failed to cancel die on arrival.

use kurbo::Point;
use smallvec::SmallVec;

use crate::types::{
    DisabledPress, Effect, Effects, Gesture, GestureConfig, GestureEvent, SwipeDirection,
    TimerKind, TimerToken,
};

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct SessionFlags: u8 {
        /// Movement beyond the move-detection threshold was observed.
        const MOVED = 1 << 0;
        /// A second concurrent contact point began during this session.
        const MULTI_TOUCH = 1 << 1;
        /// The press landed inside the double-tap window of the previous one.
        const DOUBLE_TAP = 1 << 2;
        /// A move occurrence (of any displacement) cancelled the long-tap timer.
        const LONG_TAP_CANCELLED = 1 << 3;
    }
}

/// Where the session stands between press and final classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Pressed, possibly moving; awaiting release, cancel, or long-tap.
    Pressed,
    /// Released past the swipe threshold; emission pends on the settle tick.
    SwipeSettling,
    /// Released as a tentative tap; the settle tick has not run yet.
    TapSettling,
    /// Settled as a tap candidate; the single-tap delay is running.
    TapPending,
}

/// A pointer-press occurrence.
#[derive(Clone, Copy, Debug)]
pub struct PressInput<K> {
    /// The element resolved at press time; gestures fire on it.
    pub target: K,
    /// Pointer position at press.
    pub position: Point,
    /// Event timestamp in milliseconds.
    pub timestamp: u64,
    /// Number of concurrent contact points, including this one.
    pub contacts: u8,
    /// Whether the pressed control is disabled, for
    /// [`GestureConfig::disabled_press`].
    pub target_disabled: bool,
}

impl<K> PressInput<K> {
    /// A single-contact press on an enabled control.
    pub fn new(target: K, position: Point, timestamp: u64) -> Self {
        Self {
            target,
            position,
            timestamp,
            contacts: 1,
            target_disabled: false,
        }
    }
}

#[derive(Clone, Debug)]
struct Session<K> {
    target: K,
    start: Point,
    last: Option<Point>,
    pressed_at: u64,
    flags: SessionFlags,
    phase: Phase,
    pending: SmallVec<[TimerToken; 2]>,
}

/// The gesture classification state machine.
///
/// Deterministic and clockless: timestamps come in with each occurrence and
/// delays go out as [`Effect::Schedule`] requests. See the
/// [crate docs](crate) for the classification rules and a worked example.
#[derive(Debug)]
pub struct Recognizer<K> {
    config: GestureConfig,
    session: Option<Session<K>>,
    /// Press timestamp of the last completed session, committed at release.
    /// The double-tap window is measured against it at the next press.
    previous_release: Option<u64>,
    /// Bumped whenever a session starts or ends; stale timer tokens carry an
    /// older value and are ignored.
    generation: u64,
}

impl<K: Copy + Eq> Recognizer<K> {
    /// Create a recognizer with the given thresholds.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            previous_release: None,
            generation: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a session is live (pressed or awaiting a settle timer).
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Process a press occurrence.
    ///
    /// A press with `contacts > 1` never starts a session; during a live
    /// session it marks the session multi-touch, which suppresses all
    /// single-finger emission at release. A single-contact press while a
    /// session is still live (a lost release, or a pending tap about to be
    /// reclassified as a double-tap) ends the stale session first.
    pub fn on_press(&mut self, press: PressInput<K>) -> Effects<K> {
        let mut fx = Effects::new();
        if press.contacts > 1 {
            if let Some(sess) = self.session.as_mut() {
                sess.flags |= SessionFlags::MULTI_TOUCH;
            }
            return fx;
        }
        if let Some(sess) = self.session.take() {
            self.drop_session(sess, &mut fx);
        }
        if press.target_disabled && self.config.disabled_press == DisabledPress::Ignore {
            return fx;
        }

        let mut flags = SessionFlags::empty();
        if let Some(prev) = self.previous_release {
            // A non-positive delta (non-monotonic clock) never qualifies.
            if press.timestamp > prev
                && press.timestamp - prev <= self.config.double_tap_window_ms
            {
                flags |= SessionFlags::DOUBLE_TAP;
            }
        }

        self.generation += 1;
        let token = self.token(TimerKind::LongTap);
        let mut pending = SmallVec::new();
        pending.push(token);
        self.session = Some(Session {
            target: press.target,
            start: press.position,
            last: None,
            pressed_at: press.timestamp,
            flags,
            phase: Phase::Pressed,
            pending,
        });
        fx.push(Effect::Schedule {
            token,
            delay_ms: self.config.long_tap_delay_ms,
        });
        fx
    }

    /// Process a move occurrence.
    ///
    /// Any move cancels a pending long-tap; a move with non-zero displacement
    /// from the press point marks the session as moved, which suppresses tap
    /// classification — including a tap already released and waiting out its
    /// single-tap delay.
    pub fn on_move(&mut self, position: Point) -> Effects<K> {
        let mut fx = Effects::new();
        let Some(sess) = self.session.as_mut() else {
            return fx;
        };
        sess.flags |= SessionFlags::LONG_TAP_CANCELLED;
        if let Some(i) = sess
            .pending
            .iter()
            .position(|t| t.kind == TimerKind::LongTap)
        {
            fx.push(Effect::CancelTimer(sess.pending.remove(i)));
        }
        if position != sess.start {
            sess.flags |= SessionFlags::MOVED;
        }
        sess.last = Some(position);
        fx
    }

    /// Process a release occurrence and classify the session.
    ///
    /// Swipes and taps are not emitted here; they are deferred behind settle
    /// timers (see the [crate docs](crate)). A double-tap emits immediately.
    /// The session's press timestamp is committed for the next double-tap
    /// window check regardless of how the session classifies.
    pub fn on_release(&mut self) -> Effects<K> {
        let mut fx = Effects::new();
        let Some(mut sess) = self.session.take() else {
            return fx;
        };
        if sess.phase != Phase::Pressed {
            // Only an active press can be released; settle states are
            // resolved by their timers.
            self.session = Some(sess);
            return fx;
        }
        if let Some(i) = sess
            .pending
            .iter()
            .position(|t| t.kind == TimerKind::LongTap)
        {
            fx.push(Effect::CancelTimer(sess.pending.remove(i)));
        }
        self.previous_release = Some(sess.pressed_at);

        if sess.flags.contains(SessionFlags::MULTI_TOUCH) {
            self.drop_session(sess, &mut fx);
            return fx;
        }

        let (dx, dy) = match sess.last {
            Some(last) => (sess.start.x - last.x, sess.start.y - last.y),
            None => (0.0, 0.0),
        };
        if abs(dx).max(abs(dy)) > self.config.swipe_length {
            sess.phase = Phase::SwipeSettling;
            let token = self.token(TimerKind::SwipeSettle);
            sess.pending.push(token);
            self.session = Some(sess);
            fx.push(Effect::Schedule { token, delay_ms: 0 });
        } else if !sess.flags.contains(SessionFlags::MOVED) {
            if sess.flags.contains(SessionFlags::DOUBLE_TAP) {
                fx.push(Effect::Emit(GestureEvent {
                    gesture: Gesture::DoubleTap,
                    target: sess.target,
                }));
                self.drop_session(sess, &mut fx);
            } else {
                sess.phase = Phase::TapSettling;
                let token = self.token(TimerKind::TapSettle);
                sess.pending.push(token);
                self.session = Some(sess);
                fx.push(Effect::Schedule { token, delay_ms: 0 });
            }
        } else {
            // Moved, but under the swipe threshold: not a gesture.
            self.drop_session(sess, &mut fx);
        }
        fx
    }

    /// Forcibly end the session with no emission.
    ///
    /// Handles both a pointer-cancel occurrence and a higher-priority host
    /// signal (scrolling) preempting a tentative swipe or tap.
    pub fn on_cancel(&mut self) -> Effects<K> {
        let mut fx = Effects::new();
        if let Some(sess) = self.session.take() {
            self.drop_session(sess, &mut fx);
        }
        fx
    }

    /// Handle a timer the host scheduled on the recognizer's behalf.
    ///
    /// Tokens from an ended session, and repeats of a token that already
    /// fired, are no-ops.
    pub fn on_timer(&mut self, token: TimerToken) -> Effects<K> {
        let mut fx = Effects::new();
        if token.generation != self.generation {
            return fx;
        }
        let Some(mut sess) = self.session.take() else {
            return fx;
        };
        if let Some(i) = sess.pending.iter().position(|t| *t == token) {
            sess.pending.remove(i);
        }
        match token.kind {
            TimerKind::LongTap => {
                let suppressed = SessionFlags::MOVED
                    | SessionFlags::LONG_TAP_CANCELLED
                    | SessionFlags::MULTI_TOUCH;
                if sess.phase == Phase::Pressed && !sess.flags.intersects(suppressed) {
                    fx.push(Effect::Emit(GestureEvent {
                        gesture: Gesture::LongTap,
                        target: sess.target,
                    }));
                    self.drop_session(sess, &mut fx);
                } else {
                    self.session = Some(sess);
                }
            }
            TimerKind::SwipeSettle => {
                if sess.phase == Phase::SwipeSettling {
                    let end = sess.last.unwrap_or(sess.start);
                    fx.push(Effect::Emit(GestureEvent {
                        gesture: Gesture::Swipe,
                        target: sess.target,
                    }));
                    fx.push(Effect::Emit(GestureEvent {
                        gesture: Gesture::SwipeDirected(swipe_direction(sess.start, end)),
                        target: sess.target,
                    }));
                    self.drop_session(sess, &mut fx);
                } else {
                    self.session = Some(sess);
                }
            }
            TimerKind::TapSettle => {
                if sess.phase != Phase::TapSettling {
                    self.session = Some(sess);
                } else if sess.flags.contains(SessionFlags::MOVED) {
                    // Movement arrived in the settle window: suppress the tap.
                    self.drop_session(sess, &mut fx);
                } else {
                    sess.phase = Phase::TapPending;
                    let token = self.token(TimerKind::SingleTap);
                    sess.pending.push(token);
                    self.session = Some(sess);
                    fx.push(Effect::Schedule {
                        token,
                        delay_ms: self.config.single_tap_delay_ms,
                    });
                }
            }
            TimerKind::SingleTap => {
                if sess.phase == Phase::TapPending {
                    if !sess.flags.contains(SessionFlags::MOVED) {
                        fx.push(Effect::Emit(GestureEvent {
                            gesture: Gesture::Tap,
                            target: sess.target,
                        }));
                    }
                    self.drop_session(sess, &mut fx);
                } else {
                    self.session = Some(sess);
                }
            }
        }
        fx
    }

    fn token(&self, kind: TimerKind) -> TimerToken {
        TimerToken {
            generation: self.generation,
            kind,
        }
    }

    /// End a session: cancel its outstanding timers and invalidate every
    /// token it ever issued.
    fn drop_session(&mut self, sess: Session<K>, fx: &mut Effects<K>) {
        for token in sess.pending {
            fx.push(Effect::CancelTimer(token));
        }
        self.generation += 1;
    }
}

fn abs(v: f64) -> f64 {
    if v < 0.0 { -v } else { v }
}

/// Direction along the dominant displacement axis, ties going horizontal.
fn swipe_direction(start: Point, end: Point) -> SwipeDirection {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    if abs(dx) >= abs(dy) {
        if dx > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        }
    } else if dy > 0.0 {
        SwipeDirection::Up
    } else {
        SwipeDirection::Down
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn emitted(fx: &Effects<u32>) -> Vec<GestureEvent<u32>> {
        fx.iter()
            .filter_map(|e| match e {
                Effect::Emit(ev) => Some(*ev),
                _ => None,
            })
            .collect()
    }

    fn scheduled(fx: &Effects<u32>) -> Vec<(TimerToken, u64)> {
        fx.iter()
            .filter_map(|e| match e {
                Effect::Schedule { token, delay_ms } => Some((*token, *delay_ms)),
                _ => None,
            })
            .collect()
    }

    fn scheduled_kind(fx: &Effects<u32>, kind: TimerKind) -> TimerToken {
        scheduled(fx)
            .into_iter()
            .find(|(t, _)| t.kind == kind)
            .map(|(t, _)| t)
            .expect("expected a scheduled timer of the requested kind")
    }

    /// Press + release + settle tick; returns the armed single-tap token.
    fn release_and_settle(rec: &mut Recognizer<u32>) -> TimerToken {
        let fx = rec.on_release();
        let settle = scheduled_kind(&fx, TimerKind::TapSettle);
        let fx = rec.on_timer(settle);
        scheduled_kind(&fx, TimerKind::SingleTap)
    }

    #[test]
    fn plain_tap_fires_after_single_tap_delay() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(7, Point::new(10.0, 10.0), 1_000));
        let (long, delay) = scheduled(&fx)[0];
        assert_eq!(long.kind, TimerKind::LongTap);
        assert_eq!(delay, 750);

        let tap = release_and_settle(&mut rec);
        let fx = rec.on_timer(tap);
        assert_eq!(
            emitted(&fx),
            [GestureEvent {
                gesture: Gesture::Tap,
                target: 7
            }]
        );
        assert!(!rec.is_active());
    }

    #[test]
    fn release_cancels_the_long_tap_timer() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let long = scheduled_kind(&fx, TimerKind::LongTap);
        let fx = rec.on_release();
        assert!(fx.contains(&Effect::CancelTimer(long)));
    }

    #[test]
    fn second_press_inside_window_emits_double_tap_on_second_release() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_000));
        // First release leaves a tap pending; the second press kills it.
        rec.on_release();
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_100));
        let fx = rec.on_release();
        assert_eq!(
            emitted(&fx),
            [GestureEvent {
                gesture: Gesture::DoubleTap,
                target: 7
            }]
        );
        assert!(!rec.is_active());
    }

    #[test]
    fn double_tap_pair_emits_zero_taps() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_000));
        let tap_token = release_and_settle(&mut rec);
        // Second press before the single-tap delay elapses.
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_100));
        // The host fires the now-stale tap timer anyway; nothing happens.
        let fx = rec.on_timer(tap_token);
        assert!(emitted(&fx).is_empty());
        let fx = rec.on_release();
        assert_eq!(emitted(&fx).len(), 1);
        assert_eq!(emitted(&fx)[0].gesture, Gesture::DoubleTap);
    }

    #[test]
    fn press_exactly_at_window_bound_is_a_double_tap() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_000));
        rec.on_release();
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_250));
        let fx = rec.on_release();
        assert_eq!(emitted(&fx)[0].gesture, Gesture::DoubleTap);
    }

    #[test]
    fn press_outside_window_is_a_plain_tap() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_000));
        rec.on_release();
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_251));
        let tap = release_and_settle(&mut rec);
        let fx = rec.on_timer(tap);
        assert_eq!(emitted(&fx)[0].gesture, Gesture::Tap);
    }

    #[test]
    fn non_monotonic_clock_never_double_taps() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_000));
        rec.on_release();
        // Clock went backwards: delta would be zero or negative.
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 1_000));
        let tap = release_and_settle(&mut rec);
        let fx = rec.on_timer(tap);
        assert_eq!(emitted(&fx)[0].gesture, Gesture::Tap);
    }

    #[test]
    fn swipe_emits_plain_then_directed_after_settle() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(100.0, 100.0), 0));
        rec.on_move(Point::new(20.0, 95.0));
        let fx = rec.on_release();
        let (settle, delay) = scheduled(&fx)[0];
        assert_eq!(settle.kind, TimerKind::SwipeSettle);
        assert_eq!(delay, 0);
        assert!(emitted(&fx).is_empty());

        let fx = rec.on_timer(settle);
        assert_eq!(
            emitted(&fx),
            [
                GestureEvent {
                    gesture: Gesture::Swipe,
                    target: 7
                },
                GestureEvent {
                    gesture: Gesture::SwipeDirected(SwipeDirection::Left),
                    target: 7
                },
            ]
        );
    }

    #[test]
    fn swipe_direction_matches_dominant_axis_and_sign() {
        let start = Point::new(0.0, 0.0);
        assert_eq!(swipe_direction(start, Point::new(-80.0, 10.0)), SwipeDirection::Left);
        assert_eq!(swipe_direction(start, Point::new(80.0, 10.0)), SwipeDirection::Right);
        assert_eq!(swipe_direction(start, Point::new(10.0, -80.0)), SwipeDirection::Up);
        assert_eq!(swipe_direction(start, Point::new(10.0, 80.0)), SwipeDirection::Down);
        // Equal displacement resolves horizontally.
        assert_eq!(swipe_direction(start, Point::new(80.0, 80.0)), SwipeDirection::Right);
    }

    #[test]
    fn displacement_at_threshold_is_not_a_swipe() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        rec.on_move(Point::new(50.0, 0.0));
        let fx = rec.on_release();
        // Exactly at the threshold: moved but not a swipe, so no gesture.
        assert!(scheduled(&fx).is_empty());
        assert!(emitted(&fx).is_empty());
        assert!(!rec.is_active());
    }

    #[test]
    fn moved_under_threshold_suppresses_tap() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        rec.on_move(Point::new(5.0, 5.0));
        let fx = rec.on_release();
        assert!(scheduled(&fx).is_empty());
        assert!(emitted(&fx).is_empty());
    }

    #[test]
    fn move_during_single_tap_delay_suppresses_the_tap() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let tap = release_and_settle(&mut rec);
        // A scroll-ish move arrives before the delay elapses.
        rec.on_move(Point::new(0.0, 30.0));
        let fx = rec.on_timer(tap);
        assert!(emitted(&fx).is_empty());
        assert!(!rec.is_active());
    }

    #[test]
    fn long_tap_fires_once_and_swallows_the_release() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let long = scheduled_kind(&fx, TimerKind::LongTap);
        let fx = rec.on_timer(long);
        assert_eq!(
            emitted(&fx),
            [GestureEvent {
                gesture: Gesture::LongTap,
                target: 7
            }]
        );
        // The eventual release finds no session and emits nothing.
        let fx = rec.on_release();
        assert!(emitted(&fx).is_empty());
        assert!(scheduled(&fx).is_empty());
    }

    #[test]
    fn any_move_cancels_long_tap_even_with_zero_displacement() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(7, Point::new(4.0, 4.0), 0));
        let long = scheduled_kind(&fx, TimerKind::LongTap);
        let fx = rec.on_move(Point::new(4.0, 4.0));
        assert!(fx.contains(&Effect::CancelTimer(long)));
        // Host fires it anyway; the cancellation flag suppresses it.
        let fx = rec.on_timer(long);
        assert!(emitted(&fx).is_empty());
        // Zero displacement did not mark the session moved: tap still works.
        let tap = release_and_settle(&mut rec);
        let fx = rec.on_timer(tap);
        assert_eq!(emitted(&fx)[0].gesture, Gesture::Tap);
    }

    #[test]
    fn cancel_clears_everything_and_emits_nothing() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let long = scheduled_kind(&fx, TimerKind::LongTap);
        let fx = rec.on_cancel();
        assert!(fx.contains(&Effect::CancelTimer(long)));
        assert!(emitted(&fx).is_empty());
        assert!(!rec.is_active());
        // The stale long-tap timer is dead.
        assert!(rec.on_timer(long).is_empty());
    }

    #[test]
    fn cancel_preempts_a_settling_swipe() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        rec.on_move(Point::new(120.0, 0.0));
        let fx = rec.on_release();
        let settle = scheduled_kind(&fx, TimerKind::SwipeSettle);
        // Scroll wins the turn.
        rec.on_cancel();
        let fx = rec.on_timer(settle);
        assert!(emitted(&fx).is_empty());
    }

    #[test]
    fn second_contact_suppresses_all_emission() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let two = PressInput {
            contacts: 2,
            ..PressInput::new(9, Point::new(5.0, 5.0), 10)
        };
        rec.on_press(two);
        assert!(rec.is_active());
        let fx = rec.on_release();
        assert!(emitted(&fx).is_empty());
        assert!(!rec.is_active());
    }

    #[test]
    fn multi_touch_press_without_session_starts_nothing() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let two = PressInput {
            contacts: 2,
            ..PressInput::new(7, Point::new(0.0, 0.0), 0)
        };
        let fx = rec.on_press(two);
        assert!(fx.is_empty());
        assert!(!rec.is_active());
    }

    #[test]
    fn stale_session_is_replaced_on_the_next_press() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let fx = rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let old_long = scheduled_kind(&fx, TimerKind::LongTap);
        // No release ever arrives; a new press takes over.
        let fx = rec.on_press(PressInput::new(9, Point::new(0.0, 0.0), 5_000));
        assert!(fx.contains(&Effect::CancelTimer(old_long)));
        assert!(rec.on_timer(old_long).is_empty());
        let tap = release_and_settle(&mut rec);
        let fx = rec.on_timer(tap);
        assert_eq!(emitted(&fx)[0].target, 9);
    }

    #[test]
    fn repeated_settle_fire_does_not_double_schedule() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let fx = rec.on_release();
        let settle = scheduled_kind(&fx, TimerKind::TapSettle);
        let first = rec.on_timer(settle);
        assert_eq!(scheduled(&first).len(), 1);
        let second = rec.on_timer(settle);
        assert!(second.is_empty());
    }

    #[test]
    fn disabled_press_policy_ignore_starts_no_session() {
        let config = GestureConfig {
            disabled_press: DisabledPress::Ignore,
            ..GestureConfig::default()
        };
        let mut rec: Recognizer<u32> = Recognizer::new(config);
        let press = PressInput {
            target_disabled: true,
            ..PressInput::new(7, Point::new(0.0, 0.0), 0)
        };
        assert!(rec.on_press(press).is_empty());
        assert!(!rec.is_active());
    }

    #[test]
    fn disabled_press_policy_track_behaves_normally() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::default());
        let press = PressInput {
            target_disabled: true,
            ..PressInput::new(7, Point::new(0.0, 0.0), 0)
        };
        rec.on_press(press);
        let tap = release_and_settle(&mut rec);
        let fx = rec.on_timer(tap);
        assert_eq!(emitted(&fx)[0].gesture, Gesture::Tap);
    }

    #[test]
    fn touch_preset_arms_the_longer_delay() {
        let mut rec: Recognizer<u32> = Recognizer::new(GestureConfig::touch());
        rec.on_press(PressInput::new(7, Point::new(0.0, 0.0), 0));
        let fx = rec.on_release();
        let settle = scheduled_kind(&fx, TimerKind::TapSettle);
        let fx = rec.on_timer(settle);
        let (_, delay) = scheduled(&fx)[0];
        assert_eq!(delay, 200);
    }
}
